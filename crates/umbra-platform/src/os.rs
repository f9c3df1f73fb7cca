//! Operating system family detection.

use std::fmt;

/// Operating system families that produce distinct native artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OS {
    Windows,
    Macos,
    Linux,
    Android,
    FreeBSD,
    OpenBSD,
    Unknown,
}

impl OS {
    /// Runtime-style family name used in platform tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            OS::Windows => "win32",
            OS::Macos => "darwin",
            OS::Linux => "linux",
            OS::Android => "android",
            OS::FreeBSD => "freebsd",
            OS::OpenBSD => "openbsd",
            OS::Unknown => "unknown",
        }
    }

    fn from_target(os: &str) -> Self {
        match os {
            "windows" => OS::Windows,
            "macos" => OS::Macos,
            "linux" => OS::Linux,
            "android" => OS::Android,
            "freebsd" => OS::FreeBSD,
            "openbsd" => OS::OpenBSD,
            _ => OS::Unknown,
        }
    }
}

impl fmt::Display for OS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Detect the operating system this process was built for.
///
/// Native artifacts must match the process, not the host kernel, so this reads
/// the compile target rather than querying the system.
pub fn detect() -> OS { OS::from_target(std::env::consts::OS) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_names() {
        assert_eq!(OS::from_target("windows").as_str(), "win32");
        assert_eq!(OS::from_target("macos").as_str(), "darwin");
        assert_eq!(OS::from_target("linux").as_str(), "linux");
        assert_eq!(OS::from_target("haiku"), OS::Unknown);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_detect_linux() {
        assert_eq!(detect(), OS::Linux);
    }
}
