use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

/// The fields of a package descriptor Umbra cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub name:    Option<String>,
    pub version: Option<String>,
    pub private: bool,
    pub main:    Option<String>,
}

impl Descriptor {
    /// Parse descriptor bytes. Anything that is not a JSON object yields `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(bytes).ok()?;
        let obj = value.as_object()?;

        let string = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);
        let private = match obj.get("private") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        };

        Some(Self {
            name: string("name"),
            version: string("version"),
            private,
            main: string("main"),
        })
    }

    /// Read a descriptor from disk.
    ///
    /// A missing or malformed file is `Ok(None)`; any other IO failure is an
    /// error because it means the tree itself is unreadable.
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse(&bytes)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
            Err(e) => Err(Error::Read {
                path:   path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Read a descriptor, degrading every failure to `None`.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> { Self::read(path).ok().flatten() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_fields() {
        let d = Descriptor::parse(br#"{"name":"alpha","version":"1.0.0","private":true,"main":"lib/a.js"}"#)
            .unwrap();
        assert_eq!(d.name.as_deref(), Some("alpha"));
        assert_eq!(d.version.as_deref(), Some("1.0.0"));
        assert!(d.private);
        assert_eq!(d.main.as_deref(), Some("lib/a.js"));
    }

    #[test]
    fn test_parse_defaults() {
        let d = Descriptor::parse(b"{}").unwrap();
        assert_eq!(d, Descriptor::default());
    }

    #[test]
    fn test_parse_lenient_private() {
        let d = Descriptor::parse(br#"{"private":"true","version":3}"#).unwrap();
        assert!(d.private);
        assert_eq!(d.version, None);
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Descriptor::parse(b"{ not json"), None);
        assert_eq!(Descriptor::parse(b"[1, 2]"), None);
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(Descriptor::read(dir.path().join("package.json")).unwrap(), None);
    }

    #[test]
    fn test_read_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"version":"2.1.0"}"#).unwrap();
        assert_eq!(
            Descriptor::load(&path).and_then(|d| d.version),
            Some("2.1.0".to_string())
        );
    }
}
