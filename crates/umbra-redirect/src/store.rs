use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use umbra_fs::{AtomicWriteOptions, atomic_write};
use umbra_package::Descriptor;

use crate::{RedirectKey, Record, Result};

/// File-backed store of [`Record`]s rooted at one directory.
#[derive(Debug, Clone)]
pub struct RedirectStore {
    root: PathBuf,
}

impl RedirectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    /// Read the record for `key`. Missing, unreadable and malformed records
    /// are all `None`.
    pub fn lookup(&self, key: &RedirectKey) -> Option<Record> {
        let path = key.path_in(&self.root);
        let bytes = std::fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed redirect record");
                None
            }
        }
    }

    /// Persist `record` for `key`, creating missing directories.
    ///
    /// Concurrent writers are not coordinated; the last one wins.
    pub fn record(&self, key: &RedirectKey, record: &Record) -> Result<()> {
        let path = key.path_in(&self.root);
        let content = serde_json::to_vec_pretty(record)?;
        atomic_write(&path, &content, AtomicWriteOptions::new().create_parent(true))?;
        trace!(%key, path = %record.path, "stored redirect record");
        Ok(())
    }

    /// Drop `record` for this call if `live` contradicts its version.
    ///
    /// The file itself is left in place; it is superseded by the next
    /// successful fallback resolution.
    pub fn invalidate_if_stale(
        &self,
        key: &RedirectKey,
        record: Record,
        live: Option<&Descriptor>,
    ) -> Option<Record> {
        if record.is_current(live) {
            return Some(record);
        }
        debug!(
            %key,
            recorded = ?record.version,
            live = ?live.and_then(|d| d.version.as_deref()),
            "redirect record is stale"
        );
        None
    }
}
