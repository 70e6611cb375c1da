//! Structural validation of `devfile.yaml` descriptors.
//!
//! The collector only needs a pass/fail verdict per descriptor, so the seam is
//! the small `DescriptorValidator` trait. `DevfileSchema` is the default
//! implementation: the YAML document is converted to JSON and checked against
//! a compiled JSON Schema, either the bundled one or a caller-provided file.

use anyhow::{Result, anyhow, bail};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fs;
use std::path::Path;

const BUNDLED_DEVFILE_SCHEMA: &str = include_str!("../schema/devfile.schema.json");

/// Structural validator consulted before a descriptor is indexed.
///
/// Returns the parsed descriptor on success. The collector ignores the value
/// and only acts on the error.
pub trait DescriptorValidator {
    fn validate(&self, descriptor: &Path) -> Result<Value>;
}

impl<F> DescriptorValidator for F
where
    F: Fn(&Path) -> Result<Value>,
{
    fn validate(&self, descriptor: &Path) -> Result<Value> {
        self(descriptor)
    }
}

/// Compiled devfile schema.
pub struct DevfileSchema {
    compiled: JSONSchema,
}

impl DevfileSchema {
    /// Compile the schema shipped with the crate.
    pub fn bundled() -> Result<Self> {
        let schema: Value = serde_json::from_str(BUNDLED_DEVFILE_SCHEMA)
            .map_err(|err| anyhow!("parsing bundled devfile schema: {err}"))?;
        Self::compile(&schema, "bundled devfile schema")
    }

    /// Compile a schema read from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|err| anyhow!("reading schema {}: {err}", path.display()))?;
        let schema: Value = serde_json::from_str(&data)
            .map_err(|err| anyhow!("parsing schema {}: {err}", path.display()))?;
        Self::compile(&schema, &format!("schema {}", path.display()))
    }

    /// Use `path` when given, otherwise the bundled schema.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    fn compile(schema: &Value, origin: &str) -> Result<Self> {
        // The compile error borrows `schema`; render it before returning.
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|err| anyhow!("compiling {origin}: {err}"))?;
        Ok(Self { compiled })
    }

    /// Check an already-parsed descriptor document.
    pub fn validate_value(&self, document: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(document) {
            let details = errors
                .map(|err| {
                    let pointer = err.instance_path.to_string();
                    if pointer.is_empty() {
                        format!("  - {err}")
                    } else {
                        format!("  - {pointer}: {err}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n");
            bail!("schema validation failed:\n{details}");
        }
        Ok(())
    }
}

impl DescriptorValidator for DevfileSchema {
    fn validate(&self, descriptor: &Path) -> Result<Value> {
        let bytes = fs::read(descriptor)
            .map_err(|err| anyhow!("reading {}: {err}", descriptor.display()))?;
        let document: Value = serde_yaml::from_slice(&bytes)
            .map_err(|err| anyhow!("parsing {}: {err}", descriptor.display()))?;
        self.validate_value(&document)?;
        Ok(document)
    }
}
