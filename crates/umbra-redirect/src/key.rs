use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a redirect record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedirectKey {
    /// Requesting directory, relative to the source root.
    pub from:    PathBuf,
    pub request: String,
}

impl RedirectKey {
    pub fn new(from: impl Into<PathBuf>, request: impl Into<String>) -> Self {
        Self {
            from:    from.into(),
            request: request.into(),
        }
    }

    /// Record location relative to the store root.
    ///
    /// Separators in the request are flattened to `$` so every request maps
    /// to a single file; the `.redir` suffix keeps records from colliding with
    /// directories of the same name.
    pub fn file_name(&self) -> PathBuf {
        let flat: String = self
            .request
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '$',
                c => c,
            })
            .collect();
        self.from.join(format!("{flat}.redir"))
    }

    pub fn path_in(&self, root: &Path) -> PathBuf { root.join(self.file_name()) }
}

impl fmt::Display for RedirectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' from {}", self.request, self.from.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_flattens_request() {
        let key = RedirectKey::new("node_modules/a/lib", "../build/Release/binding");
        assert_eq!(
            key.file_name(),
            PathBuf::from("node_modules/a/lib/..$build$Release$binding.redir")
        );
    }

    #[test]
    fn test_file_name_bare_request() {
        let key = RedirectKey::new("", "@scope/pkg");
        assert_eq!(key.file_name(), PathBuf::from("@scope$pkg.redir"));
    }
}
