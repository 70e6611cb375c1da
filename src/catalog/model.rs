//! Index record model and the descriptor wrapper it is lifted from.
//!
//! `IndexRecord` mirrors one entry of the published `index.json`. Optional
//! containers stay `Option` on purpose: an absent `links` or `resources` list
//! is a different state from an empty one, and validation tells them apart.
//! Field order here is the field order of the serialized index.

use crate::catalog::identity::StackType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// One stack entry of the registry index.
pub struct IndexRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stack_type: Option<StackType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_memory_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter_projects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    /// Descriptor metadata keys the index does not model; copied through as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// The part of a `devfile.yaml` document the index cares about.
///
/// Everything outside `metadata` (components, commands, ...) is ignored here;
/// structural checks on those sections belong to the descriptor validator.
pub struct DescriptorMeta {
    #[serde(default)]
    pub metadata: IndexRecord,
}

impl IndexRecord {
    /// Append a resource file name, creating the list on first use.
    pub fn push_resource(&mut self, file_name: impl Into<String>) {
        self.resources
            .get_or_insert_with(Vec::new)
            .push(file_name.into());
    }
}

/// Parse descriptor bytes and lift the embedded metadata record.
pub fn parse_descriptor(bytes: &[u8]) -> Result<IndexRecord, serde_yaml::Error> {
    let meta: DescriptorMeta = serde_yaml::from_slice(bytes)?;
    Ok(meta.metadata)
}
