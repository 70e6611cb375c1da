//! Generates `index.json` for a devfile registry.
//!
//! Usage: `index-generator <REGISTRY_DIR> <INDEX_FILE> [--force]`. Logs go to
//! stderr; on failure the error is printed and no index is written.

use anyhow::Result;
use clap::Parser;
use devfile_index::logging::init_logger;
use devfile_index::{GeneratorArgs, GeneratorConfig};

fn main() {
    if let Err(err) = run() {
        // IndexError messages already embed their cause.
        eprintln!("index-generator: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = GeneratorConfig::from_args(GeneratorArgs::parse());
    init_logger(config.log_directive.as_deref(), config.verbose);
    devfile_index::run(&config)?;
    Ok(())
}
