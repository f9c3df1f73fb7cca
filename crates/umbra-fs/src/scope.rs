use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// A directory root that relative paths are resolved against.
///
/// Relative paths that climb out of the root are rejected, so a mirror
/// destination can never land outside the shadow tree.
#[derive(Debug, Clone)]
pub struct Scope<'a>(Cow<'a, Path>);

impl<'a> Scope<'a> {
    pub fn new(root: impl Into<Cow<'a, Path>>) -> Self { Self(root.into()) }

    pub fn path(&self) -> &Path { self.0.as_ref() }

    pub fn join(&self, rel: impl AsRef<Path>) -> Result<PathBuf> {
        let rel = rel.as_ref();
        let escapes = rel.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            return Err(Error::OutsideScope {
                root: self.path().to_path_buf(),
                path: rel.to_path_buf(),
            });
        }
        Ok(self.path().join(rel))
    }
}
