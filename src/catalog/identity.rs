use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Organizational prefix of every self link written into the index.
pub const CATALOG_PREFIX: &str = "devfile-catalog";

/// Tag used for every self link; it is not derived from the stack version.
pub const LATEST_TAG: &str = "latest";

/// Kind of registry entry declared in `metadata.type`.
///
/// `Other` keeps unknown values verbatim so newer registries still index
/// cleanly with older generators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StackType {
    Stack,
    Sample,
    Other(String),
}

impl Serialize for StackType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StackType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl StackType {
    pub fn as_str(&self) -> &str {
        match self {
            StackType::Stack => "stack",
            StackType::Sample => "sample",
            StackType::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "stack" => StackType::Stack,
            "sample" => StackType::Sample,
            other => StackType::Other(other.to_string()),
        }
    }
}

/// Reference under which a stack is published, e.g. `devfile-catalog/go:latest`.
pub fn self_link(name: &str) -> String {
    format!("{CATALOG_PREFIX}/{name}:{LATEST_TAG}")
}
