use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use umbra_package::Descriptor;

/// Stand-in for the live platform tag inside a stored path.
pub const BIN_PLACEHOLDER: &str = "$$BIN$$";

/// A remembered fallback resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Version of the package the cached file belongs to, if it had one.
    pub version: Option<String>,
    /// Path relative to the shadow root, `/`-separated. Binary-zone paths
    /// start with [`BIN_PLACEHOLDER`].
    pub path:    String,
}

impl Record {
    /// Record for a file in the portable zone.
    pub fn portable(version: Option<String>, rel: &Path) -> Self {
        Self {
            version,
            path: to_slash(rel),
        }
    }

    /// Record for a file in the binary zone; `rel` excludes the tag segment.
    pub fn binary(version: Option<String>, rel: &Path) -> Self {
        Self {
            version,
            path: format!("{BIN_PLACEHOLDER}/{}", to_slash(rel)),
        }
    }

    pub fn is_binary(&self) -> bool { self.path.starts_with(BIN_PLACEHOLDER) }

    /// Path inside its zone, without the placeholder segment.
    pub fn relative(&self) -> PathBuf {
        self.path
            .strip_prefix(BIN_PLACEHOLDER)
            .unwrap_or(&self.path)
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Absolute cached path for the live platform tag.
    pub fn cached_path(&self, shadow_root: &Path, tag: &str) -> PathBuf {
        self.path
            .replace(BIN_PLACEHOLDER, tag)
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(shadow_root.to_path_buf(), |acc, s| acc.join(s))
    }

    /// A record is stale once the live package reports a different version.
    /// Without a live package there is nothing to contradict it.
    pub fn is_current(&self, live: Option<&Descriptor>) -> bool {
        match live {
            Some(descriptor) => descriptor.version == self.version,
            None => true,
        }
    }
}

fn to_slash(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_placeholder_substitution() {
        let record = Record::binary(Some("1.0.0".into()), Path::new("node_modules/alpha/native.node"));
        assert_eq!(record.path, "$$BIN$$/node_modules/alpha/native.node");
        assert!(record.is_binary());
        assert_eq!(record.relative(), PathBuf::from("node_modules/alpha/native.node"));
        assert_eq!(
            record.cached_path(Path::new("/shadow"), "linux-x64-rt-8.1"),
            PathBuf::from("/shadow/linux-x64-rt-8.1/node_modules/alpha/native.node")
        );
    }

    #[test]
    fn test_portable_path() {
        let record = Record::portable(None, Path::new("node_modules/alpha/index.js"));
        assert!(!record.is_binary());
        assert_eq!(
            record.cached_path(Path::new("/shadow"), "ignored"),
            PathBuf::from("/shadow/node_modules/alpha/index.js")
        );
    }

    #[test]
    fn test_is_current() {
        let record = Record::portable(Some("1.0.0".into()), Path::new("a.js"));
        let same = Descriptor {
            version: Some("1.0.0".into()),
            ..Default::default()
        };
        let newer = Descriptor {
            version: Some("1.1.0".into()),
            ..Default::default()
        };
        assert!(record.is_current(None));
        assert!(record.is_current(Some(&same)));
        assert!(!record.is_current(Some(&newer)));
    }

    #[test]
    fn test_wire_format() {
        let record: Record = serde_json::from_str(r#"{"version":null,"path":"$$BIN$$/a/b.node"}"#).unwrap();
        assert_eq!(record.version, None);
        assert!(record.is_binary());
    }
}
