//! Registry index wiring.
//!
//! `index` scans a registry tree into `IndexRecord`s, `writer` persists the
//! result, and `model`/`identity` hold the record types and the fixed naming
//! rules for self links.

pub mod identity;
pub mod index;
pub mod model;
pub mod writer;

pub use identity::{CATALOG_PREFIX, LATEST_TAG, StackType, self_link};
pub use index::{DESCRIPTOR_FILE, IndexOptions, generate_index, generate_index_with};
pub use model::{DescriptorMeta, IndexRecord, parse_descriptor};
pub use writer::write_index_file;
