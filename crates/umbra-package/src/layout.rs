use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Naming conventions of a dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Directory that separates a package from its dependencies.
    pub boundary:         String,
    /// Descriptor file name inside a package directory.
    pub descriptor:       String,
    /// Extension of compiled native artifacts, without the dot.
    pub native_extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            boundary:         "node_modules".to_string(),
            descriptor:       "package.json".to_string(),
            native_extension: "node".to_string(),
        }
    }
}

impl Layout {
    pub fn is_boundary(&self, name: &OsStr) -> bool { name == OsStr::new(&self.boundary) }

    pub fn is_descriptor(&self, name: &OsStr) -> bool { name == OsStr::new(&self.descriptor) }

    pub fn descriptor_in(&self, dir: &Path) -> PathBuf { dir.join(&self.descriptor) }

    /// Directory of the innermost package containing `rel`.
    ///
    /// `a/node_modules/@s/b/lib/x.js` yields `a/node_modules/@s/b`. Paths that
    /// never cross a boundary have no package root.
    pub fn package_root(&self, rel: &Path) -> Option<PathBuf> {
        let parts: Vec<Component<'_>> = rel.components().collect();
        let at = parts
            .iter()
            .rposition(|c| self.is_boundary(c.as_os_str()))?;

        let name = parts.get(at + 1)?;
        let end = if name.as_os_str().to_string_lossy().starts_with('@') {
            at + 2
        } else {
            at + 1
        };
        if end >= parts.len() {
            return None;
        }
        Some(parts[..=end].iter().collect())
    }

    /// Search directories for bare requests made from `dir`.
    ///
    /// Walks from `dir` up to and including `stop`, yielding `<ancestor>/<boundary>`
    /// for every ancestor that is not itself a boundary directory. Returns an
    /// empty list when `dir` is not under `stop`.
    pub fn search_paths(&self, dir: &Path, stop: &Path) -> Vec<PathBuf> {
        if !dir.starts_with(stop) {
            return Vec::new();
        }

        let mut paths = Vec::new();
        for ancestor in dir.ancestors() {
            let is_boundary = ancestor
                .file_name()
                .is_some_and(|name| self.is_boundary(name));
            if !is_boundary {
                paths.push(ancestor.join(&self.boundary));
            }
            if ancestor == stop {
                break;
            }
        }
        paths
    }
}
