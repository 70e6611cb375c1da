//! Persists a generated index as pretty-printed JSON.

use crate::catalog::model::IndexRecord;
use crate::error::IndexError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

#[cfg(unix)]
const INDEX_FILE_MODE: u32 = 0o644;

/// Serialize `index` and write it to `path` in a single write.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it, so readers see either the previous index or the complete new
/// one. The file ends up with `0644` permissions on Unix.
pub fn write_index_file(index: &[IndexRecord], path: &Path) -> Result<(), IndexError> {
    let bytes = serde_json::to_vec_pretty(index).map_err(|source| IndexError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(Permissions::from_mode(INDEX_FILE_MODE))
            .map_err(write_err)?;
    }
    staged.write_all(&bytes).map_err(write_err)?;
    // A failed rename drops the temporary file and leaves `path` untouched.
    staged.persist(path).map_err(|err| write_err(err.error))?;

    info!(path = %path.display(), stacks = index.len(), "wrote index");
    Ok(())
}
