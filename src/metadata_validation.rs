//! Semantic checks applied to enriched index records.
//!
//! These run after enrichment, so a missing `links` map only shows up when
//! enrichment itself was bypassed. Empty-but-present containers pass; only
//! absent ones are rejected.

use crate::catalog::IndexRecord;
use crate::error::RecordError;
use std::collections::BTreeMap;

/// Check the required fields of one record; the first violation wins.
pub fn validate_index_record(record: &IndexRecord) -> Result<(), RecordError> {
    if record.name.is_empty() {
        return Err(RecordError::NameNotInitialized);
    }
    if record.links.is_none() {
        return Err(RecordError::LinksMissing);
    }
    if record.resources.is_none() {
        return Err(RecordError::ResourcesMissing);
    }
    Ok(())
}

/// A stack name that appears more than once, with both positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    pub first: usize,
    pub second: usize,
}

/// Find the first name that repeats in index order.
pub fn find_duplicate_names(index: &[IndexRecord]) -> Option<DuplicateName> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (position, record) in index.iter().enumerate() {
        if let Some(&first) = seen.get(record.name.as_str()) {
            return Some(DuplicateName {
                name: record.name.clone(),
                first,
                second: position,
            });
        }
        seen.insert(record.name.as_str(), position);
    }
    None
}
