use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Line-ending policy for text copies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `Lf` on Windows checkouts, `Preserve` elsewhere.
    #[default]
    Native,
    Preserve,
    Lf,
    Crlf,
}

impl LineEnding {
    /// Collapse `Native` into the concrete policy of the current platform.
    pub fn resolve(self) -> Self {
        match self {
            LineEnding::Native if cfg!(windows) => LineEnding::Lf,
            LineEnding::Native => LineEnding::Preserve,
            other => other,
        }
    }

    pub fn apply(self, content: &[u8]) -> Cow<'_, [u8]> {
        match self.resolve() {
            LineEnding::Native | LineEnding::Preserve => Cow::Borrowed(content),
            LineEnding::Lf if !content.windows(2).any(|w| w == b"\r\n") => Cow::Borrowed(content),
            LineEnding::Lf => Cow::Owned(to_lf(content)),
            LineEnding::Crlf => {
                let lf = to_lf(content);
                let mut out = Vec::with_capacity(lf.len() + lf.len() / 16);
                for &b in &lf {
                    if b == b'\n' {
                        out.push(b'\r');
                    }
                    out.push(b);
                }
                if out == content {
                    Cow::Borrowed(content)
                } else {
                    Cow::Owned(out)
                }
            }
        }
    }
}

fn to_lf(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    let mut iter = content.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

/// Copy a text file, normalizing line endings. Returns the bytes written.
pub fn copy_text(src: impl AsRef<Path>, dest: impl AsRef<Path>, ending: LineEnding) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    let content = super::atomic_read(src)?;
    let content = ending.apply(&content);

    if let Some(parent) = dest.parent() {
        super::ensure_dir(parent)?;
    }
    fs::write(dest, &content).map_err(|e| Error::Write {
        path:   dest.to_path_buf(),
        source: e,
    })?;
    Ok(content.len() as u64)
}

/// Copy a file byte for byte. Returns the bytes written.
pub fn copy_binary(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if !src.is_file() {
        return Err(Error::Read {
            path:   src.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    if let Some(parent) = dest.parent() {
        super::ensure_dir(parent)?;
    }
    fs::copy(src, dest).map_err(|e| Error::Write {
        path:   dest.to_path_buf(),
        source: e,
    })
}

/// Whether `dest` already holds what copying `src` would produce.
///
/// A missing `dest` is simply not a copy; an unreadable `src` is an error.
pub fn is_copy_of(src: impl AsRef<Path>, dest: impl AsRef<Path>, ending: LineEnding) -> Result<bool> {
    let dest = dest.as_ref();
    let Ok(existing) = fs::read(dest) else {
        return Ok(false);
    };
    let content = super::atomic_read(src)?;
    Ok(*ending.apply(&content) == *existing)
}
