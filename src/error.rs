//! Error taxonomy for index generation.
//!
//! Every variant names the registry directory or file that caused it so a
//! failed run points straight at the offending stack.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause reported by a descriptor validator.
pub type ValidatorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read registry directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    DescriptorRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to unmarshal {} data: {source}", .path.display())]
    DescriptorParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to load devfile schema: {source}")]
    SchemaLoad { source: ValidatorError },

    #[error("{component} devfile is not valid: {source}")]
    StructuralValidation {
        component: String,
        source: ValidatorError,
    },

    #[error("{component} index component is not valid: {source}")]
    SemanticValidation {
        component: String,
        source: RecordError,
    },

    #[error("duplicate stack name '{name}' in {first} and {second}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("failed to marshal {} data: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Required-field violations found by semantic validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("index component name is not initialized")]
    NameNotInitialized,
    #[error("index component links are empty")]
    LinksMissing,
    #[error("index component resources are empty")]
    ResourcesMissing,
}
