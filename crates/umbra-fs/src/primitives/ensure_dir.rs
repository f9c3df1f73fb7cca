use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Create `path` and any missing ancestors.
///
/// Returns `true` if anything was created. Calling it on an existing
/// directory is a no-op, which keeps repeated mirror passes write-free.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(path).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_creates_ancestors() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        assert!(ensure_dir(&nested).unwrap());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a");
        ensure_dir(&nested).unwrap();
        assert!(!ensure_dir(&nested).unwrap());
    }

    #[test]
    fn test_ensure_dir_over_file_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        let err = ensure_dir(file.join("sub")).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
