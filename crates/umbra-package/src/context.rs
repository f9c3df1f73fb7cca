use crate::Descriptor;

/// Nearest enclosing package while walking a dependency tree.
///
/// Directories without a descriptor inherit the context of their parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageContext {
    pub name:    Option<String>,
    pub version: Option<String>,
    pub private: bool,
    /// Number of dependency boundaries crossed from the source root.
    pub depth:   usize,
}

impl PackageContext {
    pub fn root() -> Self { Self::default() }

    /// Context after descending into a dependency boundary directory.
    pub fn enter_boundary(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Context of a directory that carries its own descriptor.
    pub fn with_descriptor(&self, descriptor: &Descriptor) -> Self {
        Self {
            name:    descriptor.name.clone(),
            version: descriptor.version.clone(),
            private: descriptor.private,
            depth:   self.depth,
        }
    }

    /// Whether files of this package may enter the shared shadow tree.
    ///
    /// Private packages are kept out unless they sit at least
    /// `private_depth` boundaries deep.
    pub fn is_shareable(&self, private_depth: usize) -> bool {
        !self.private || self.depth >= private_depth
    }
}
