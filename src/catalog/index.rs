//! Registry scan that turns stack directories into index records.
//!
//! The scan is all-or-nothing: the first unreadable, malformed, or invalid
//! stack aborts the run and no partial index is returned. Directory entries
//! are visited in file-name order so repeated runs produce identical output.

use crate::catalog::identity::self_link;
use crate::catalog::model::{IndexRecord, parse_descriptor};
use crate::error::IndexError;
use crate::metadata_validation::{find_duplicate_names, validate_index_record};
use crate::schema_loader::{DescriptorValidator, DevfileSchema};
use std::fs::{self, DirEntry};
use std::path::Path;
use tracing::{debug, info, warn};

/// Descriptor file expected inside every stack directory.
pub const DESCRIPTOR_FILE: &str = "devfile.yaml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Knobs for a registry scan.
pub struct IndexOptions {
    /// Skip both structural and semantic validation.
    pub force: bool,
    /// Reject the run when two stacks share a name. Ignored under `force`.
    pub enforce_unique_names: bool,
}

/// Scan `registry_dir` and validate descriptors against the bundled schema.
pub fn generate_index(
    registry_dir: &Path,
    options: IndexOptions,
) -> Result<Vec<IndexRecord>, IndexError> {
    if options.force {
        // The schema is never consulted, so skip compiling it.
        return generate_index_with(registry_dir, options, &skip_structural_validation);
    }
    let schema =
        DevfileSchema::bundled().map_err(|err| IndexError::SchemaLoad { source: err.into() })?;
    generate_index_with(registry_dir, options, &schema)
}

/// Scan `registry_dir`, consulting `validator` for structural checks.
pub fn generate_index_with<V>(
    registry_dir: &Path,
    options: IndexOptions,
    validator: &V,
) -> Result<Vec<IndexRecord>, IndexError>
where
    V: DescriptorValidator + ?Sized,
{
    info!(registry = %registry_dir.display(), force = options.force, "scanning registry");
    if options.force {
        warn!("validation disabled; the index carries no correctness guarantees");
    }

    let entries = sorted_entries(registry_dir).map_err(|source| IndexError::DirectoryRead {
        path: registry_dir.to_path_buf(),
        source,
    })?;

    let mut index = Vec::new();
    let mut components = Vec::new();
    for entry in entries {
        let stack = is_dir(&entry).map_err(|source| IndexError::DirectoryRead {
            path: entry.path(),
            source,
        })?;
        if !stack {
            continue;
        }
        let component = entry.file_name().to_string_lossy().into_owned();
        let record = index_component(&entry.path(), &component, options, validator)?;
        debug!(
            component = %component,
            name = %record.name,
            resources = record.resources.as_ref().map_or(0, Vec::len),
            "indexed stack"
        );
        index.push(record);
        components.push(component);
    }

    if options.enforce_unique_names && !options.force {
        if let Some(dup) = find_duplicate_names(&index) {
            return Err(IndexError::DuplicateName {
                name: dup.name,
                first: components[dup.first].clone(),
                second: components[dup.second].clone(),
            });
        }
    }

    info!(stacks = index.len(), "registry scan complete");
    Ok(index)
}

fn index_component<V>(
    stack_dir: &Path,
    component: &str,
    options: IndexOptions,
    validator: &V,
) -> Result<IndexRecord, IndexError>
where
    V: DescriptorValidator + ?Sized,
{
    let descriptor = stack_dir.join(DESCRIPTOR_FILE);

    // Read first: a missing descriptor is a read error whether or not the
    // validator would have run.
    let bytes = fs::read(&descriptor).map_err(|source| IndexError::DescriptorRead {
        path: descriptor.clone(),
        source,
    })?;

    if !options.force {
        validator
            .validate(&descriptor)
            .map_err(|err| IndexError::StructuralValidation {
                component: component.to_string(),
                source: err.into(),
            })?;
    }

    let mut record = parse_descriptor(&bytes).map_err(|source| IndexError::DescriptorParse {
        path: descriptor.clone(),
        source,
    })?;

    let link = self_link(&record.name);
    record
        .links
        .get_or_insert_with(Default::default)
        .insert("self".to_string(), link);

    apply_resource_listing(&mut record, list_resources(stack_dir), component);

    if !options.force {
        validate_index_record(&record).map_err(|source| IndexError::SemanticValidation {
            component: component.to_string(),
            source,
        })?;
    }

    Ok(record)
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}

/// File names directly inside `stack_dir`, sorted, without subdirectories.
///
/// Nested folders should already be archived by the registry build; only
/// plain files are published as resources.
fn list_resources(stack_dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in sorted_entries(stack_dir)? {
        if !is_dir(&entry)? {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

// A listing failure is not fatal. The record keeps whatever resources the
// descriptor declared and semantic validation decides whether that is enough.
fn apply_resource_listing(
    record: &mut IndexRecord,
    listing: std::io::Result<Vec<String>>,
    component: &str,
) {
    match listing {
        Ok(files) => {
            for file in files {
                record.push_resource(file);
            }
        }
        Err(err) => {
            warn!(
                component = %component,
                error = %err,
                "unable to list stack resources; indexing without them"
            );
        }
    }
}

// Symlinks are not followed: a link is never treated as a stack directory
// and is listed as a plain resource.
fn is_dir(entry: &DirEntry) -> std::io::Result<bool> {
    Ok(entry.file_type()?.is_dir())
}

fn skip_structural_validation(_descriptor: &Path) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use std::io;
    use tempfile::TempDir;

    fn named(name: &str) -> IndexRecord {
        IndexRecord {
            name: name.to_string(),
            links: Some([("self".to_string(), self_link(name))].into()),
            ..Default::default()
        }
    }

    fn listing_error() -> io::Result<Vec<String>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }

    #[test]
    fn sorted_entries_orders_by_file_name() {
        let temp = TempDir::new().expect("temp dir");
        for name in ["zeta", "alpha", "Mid"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        let names: Vec<String> = sorted_entries(temp.path())
            .unwrap()
            .iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn forced_scan_never_calls_validator() {
        let temp = TempDir::new().expect("temp dir");
        let stack = temp.path().join("go");
        fs::create_dir(&stack).unwrap();
        fs::write(stack.join(DESCRIPTOR_FILE), "metadata:\n  name: go\n").unwrap();

        let rejecting = |_: &Path| -> anyhow::Result<serde_json::Value> {
            anyhow::bail!("validator must not run")
        };
        let options = IndexOptions {
            force: true,
            ..Default::default()
        };
        let index = generate_index_with(temp.path(), options, &rejecting).expect("forced scan");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn descriptor_self_link_is_overwritten() {
        let temp = TempDir::new().expect("temp dir");
        let stack = temp.path().join("go");
        fs::create_dir(&stack).unwrap();
        fs::write(
            stack.join(DESCRIPTOR_FILE),
            "metadata:\n  name: go\n  links:\n    self: elsewhere/go:1.0\n    docs: https://go.dev\n",
        )
        .unwrap();

        let index = generate_index(
            temp.path(),
            IndexOptions {
                force: true,
                ..Default::default()
            },
        )
        .unwrap();
        let links = index[0].links.as_ref().unwrap();
        assert_eq!(links["self"], "devfile-catalog/go:latest");
        assert_eq!(links["docs"], "https://go.dev");
    }

    #[test]
    fn list_resources_skips_directories_in_name_order() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join(DESCRIPTOR_FILE), "").unwrap();
        fs::write(temp.path().join("archive.tar"), "").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        assert_eq!(
            list_resources(temp.path()).unwrap(),
            vec!["archive.tar", DESCRIPTOR_FILE]
        );
    }

    #[test]
    fn list_resources_fails_for_missing_directory() {
        let temp = TempDir::new().expect("temp dir");
        let err = list_resources(&temp.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn listing_error_keeps_declared_resources() {
        let mut record = named("java");
        record.resources = Some(vec!["prebuilt.zip".to_string()]);
        apply_resource_listing(&mut record, listing_error(), "java");
        assert_eq!(record.resources, Some(vec!["prebuilt.zip".to_string()]));
        assert_eq!(validate_index_record(&record), Ok(()));
    }

    #[test]
    fn listing_error_without_declared_resources_fails_validation() {
        let mut record = named("java");
        apply_resource_listing(&mut record, listing_error(), "java");
        assert_eq!(record.resources, None);
        assert_eq!(
            validate_index_record(&record),
            Err(RecordError::ResourcesMissing)
        );
    }

    #[test]
    fn listing_appends_after_declared_resources() {
        let mut record = named("java");
        record.resources = Some(vec!["prebuilt.zip".to_string()]);
        apply_resource_listing(
            &mut record,
            Ok(vec![DESCRIPTOR_FILE.to_string()]),
            "java",
        );
        assert_eq!(
            record.resources,
            Some(vec!["prebuilt.zip".to_string(), DESCRIPTOR_FILE.to_string()])
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_a_resource_not_a_stack() {
        let temp = TempDir::new().expect("temp dir");
        let stack = temp.path().join("go");
        fs::create_dir(&stack).unwrap();
        fs::write(stack.join(DESCRIPTOR_FILE), "metadata:\n  name: go\n").unwrap();
        std::os::unix::fs::symlink(&stack, temp.path().join("go-link")).unwrap();
        std::os::unix::fs::symlink(temp.path(), stack.join("registry")).unwrap();

        let options = IndexOptions {
            force: true,
            ..Default::default()
        };
        let index = generate_index(temp.path(), options).expect("forced scan");
        assert_eq!(index.len(), 1);
        assert_eq!(
            index[0].resources,
            Some(vec![DESCRIPTOR_FILE.to_string(), "registry".to_string()])
        );
    }
}
