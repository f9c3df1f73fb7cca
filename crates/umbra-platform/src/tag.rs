use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::runtime::RuntimeVersion;
use crate::{arch, os};

static TAG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+-[a-z0-9]+-rt-[0-9]+\.[0-9]+$").expect("static pattern"));

/// Identifier of a binary zone: `<os>-<arch>-rt-<major>.<minor>`.
///
/// Two processes share compiled artifacts only if their tags are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformTag(String);

impl PlatformTag {
    pub fn new(os: os::OS, arch: arch::Arch, runtime: RuntimeVersion) -> Self {
        Self(format!("{os}-{arch}-rt-{runtime}"))
    }

    /// Tag for the current process and the given runtime.
    pub fn detect(runtime: RuntimeVersion) -> Self { Self::new(os::detect(), arch::detect(), runtime) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Whether `path` is already platform-qualified with this tag.
    pub fn qualifies(&self, path: &Path) -> bool { path.to_string_lossy().contains(self.0.as_str()) }

    /// Whether a directory name has the shape of a platform tag.
    pub fn looks_like(name: &str) -> bool { TAG_SHAPE.is_match(name) }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for PlatformTag {
    fn as_ref(&self) -> &str { &self.0 }
}

impl AsRef<Path> for PlatformTag {
    fn as_ref(&self) -> &Path { Path::new(&self.0) }
}
