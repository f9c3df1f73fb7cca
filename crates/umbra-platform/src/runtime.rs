//! ABI version of the embedding runtime.

use std::ffi::OsStr;
use std::fmt;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

static MAJOR_MINOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\.([0-9]+)").expect("static pattern"));

/// Coarse `major.minor` version of the runtime that loads native artifacts.
///
/// Patch levels never change binary compatibility, so they are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    pub fn new(major: u32, minor: u32) -> Self { Self { major, minor } }

    /// Extract the first `major.minor` pair found in `text`.
    ///
    /// Accepts full version strings such as `8.1.234.17`, `v20.11.0` or the
    /// raw output of a version command.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = MAJOR_MINOR
            .captures(text)
            .ok_or_else(|| Error::UnknownRuntime(text.trim().to_string()))?;
        let major = caps[1]
            .parse()
            .map_err(|_| Error::UnknownRuntime(text.trim().to_string()))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| Error::UnknownRuntime(text.trim().to_string()))?;
        Ok(Self { major, minor })
    }

    /// Run `program args...` and parse its standard output.
    pub fn probe<I, S>(program: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                cmd: program.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Error::CommandStatus {
                cmd: program.to_string(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = Self::parse(&stdout)?;
        debug!(program, %version, "probed runtime version");
        Ok(version)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
