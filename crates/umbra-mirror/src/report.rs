use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of one mirror pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    pub portable_written:    usize,
    pub binary_written:      usize,
    pub descriptors_written: usize,
    pub unchanged:           usize,
    /// Files classified as skip or belonging to packages kept out of the cache.
    pub skipped:             usize,
    pub bytes_written:       u64,
    /// Longest destination path seen, for path-length diagnostics.
    pub longest_path:        Option<PathBuf>,
}

impl MirrorReport {
    pub fn writes(&self) -> usize {
        self.portable_written + self.binary_written + self.descriptors_written
    }

    pub fn longest_len(&self) -> usize {
        self.longest_path
            .as_ref()
            .map_or(0, |p| p.as_os_str().len())
    }

    pub(crate) fn observe(&mut self, dest: &Path) {
        if dest.as_os_str().len() > self.longest_len() {
            self.longest_path = Some(dest.to_path_buf());
        }
    }
}

impl fmt::Display for MirrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} portable, {} binary, {} descriptors written; {} unchanged, {} skipped",
            self.portable_written,
            self.binary_written,
            self.descriptors_written,
            self.unchanged,
            self.skipped
        )?;
        if let Some(path) = &self.longest_path {
            write!(f, "; longest path ({}): {}", self.longest_len(), path.display())?;
        }
        Ok(())
    }
}
