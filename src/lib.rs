//! Registry index generator for devfile stacks.
//!
//! A registry is a directory with one subdirectory per stack, each holding a
//! `devfile.yaml` descriptor and the resource files published with it. The
//! crate scans that tree, validates every descriptor, enriches the metadata
//! with a self link and the resource listing, and writes a single
//! `index.json` for publishing tooling.
//!
//! A run is all-or-nothing: either every stack is indexed and the file is
//! written, or the first failure is returned and nothing is written.

use anyhow::Result;
use tracing::info;

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata_validation;
pub mod schema_loader;

pub use catalog::{
    CATALOG_PREFIX, DESCRIPTOR_FILE, DescriptorMeta, IndexOptions, IndexRecord, LATEST_TAG,
    StackType, generate_index, generate_index_with, parse_descriptor, self_link,
    write_index_file,
};
pub use config::{GeneratorArgs, GeneratorConfig};
pub use error::{IndexError, RecordError};
pub use metadata_validation::{DuplicateName, find_duplicate_names, validate_index_record};
pub use schema_loader::{DescriptorValidator, DevfileSchema};

/// Generate the index described by `config` and write it to disk.
///
/// Returns the records that were written. The schema is only compiled when
/// validation is enabled.
pub fn run(config: &GeneratorConfig) -> Result<Vec<IndexRecord>> {
    let index = if config.options.force {
        generate_index(&config.registry_dir, config.options)?
    } else {
        let schema = DevfileSchema::resolve(config.schema_path.as_deref())
            .map_err(|err| IndexError::SchemaLoad { source: err.into() })?;
        generate_index_with(&config.registry_dir, config.options, &schema)?
    };
    write_index_file(&index, &config.index_file)?;
    info!(
        registry = %config.registry_dir.display(),
        index = %config.index_file.display(),
        stacks = index.len(),
        "index generated"
    );
    Ok(index)
}
