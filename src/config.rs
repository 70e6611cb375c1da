//! Generator settings: command-line flags layered over environment variables.
//!
//! Precedence is flag, then environment, then built-in default. Environment
//! lookups go through a caller-supplied function so tests never touch the
//! process environment.

use crate::catalog::IndexOptions;
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Non-empty and not `0` forces the run.
pub const FORCE_ENV: &str = "DEVFILE_INDEX_FORCE";
/// Path to a JSON Schema replacing the bundled devfile schema.
pub const SCHEMA_ENV: &str = "DEVFILE_SCHEMA_PATH";
/// `tracing` filter directive for the generator log.
pub const LOG_ENV: &str = "DEVFILE_INDEX_LOG";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "index-generator",
    version,
    about = "Scan a devfile registry and write its index.json"
)]
pub struct GeneratorArgs {
    /// Registry root containing one directory per stack
    #[arg(value_name = "REGISTRY_DIR")]
    pub registry_dir: PathBuf,

    /// Where to write the generated index
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Skip descriptor and index component validation
    #[arg(short, long)]
    pub force: bool,

    /// Fail when two stacks declare the same name
    #[arg(long)]
    pub unique_names: bool,

    /// JSON Schema used for structural descriptor validation
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully resolved settings for one generator run.
pub struct GeneratorConfig {
    pub registry_dir: PathBuf,
    pub index_file: PathBuf,
    pub options: IndexOptions,
    pub schema_path: Option<PathBuf>,
    pub log_directive: Option<String>,
    pub verbose: bool,
}

impl GeneratorConfig {
    /// Resolve against the process environment.
    pub fn from_args(args: GeneratorArgs) -> Self {
        Self::resolve(args, |name| env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve<F>(args: GeneratorArgs, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let force = args.force || lookup(FORCE_ENV).is_some_and(|value| is_truthy(&value));
        let schema_path = args
            .schema
            .or_else(|| non_empty(lookup(SCHEMA_ENV)).map(PathBuf::from));
        Self {
            registry_dir: args.registry_dir,
            index_file: args.index_file,
            options: IndexOptions {
                force,
                enforce_unique_names: args.unique_names,
            },
            schema_path,
            log_directive: non_empty(lookup(LOG_ENV)),
            verbose: args.verbose,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0"
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
