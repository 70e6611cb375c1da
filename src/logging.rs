//! Tracing subscriber setup for the generator binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr logger.
///
/// `directive` (e.g. `DEVFILE_INDEX_LOG`) wins over the verbosity flag when it
/// parses; otherwise the level is `debug` with `verbose` and `info` without.
pub fn init_logger(directive: Option<&str>, verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = directive
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A second initialization (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
