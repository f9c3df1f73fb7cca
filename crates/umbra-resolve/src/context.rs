use std::fmt;
use std::path::{Path, PathBuf};

/// How a request string locates its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `./x`, `../x`, `.` or `..`: resolved by position only.
    Relative,
    Absolute,
    /// A package name, possibly with a subpath: resolved through search paths.
    Bare,
}

/// A module request exactly as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Request(String);

impl Request {
    pub fn new(request: impl Into<String>) -> Self { Self(request.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn kind(&self) -> RequestKind {
        let s = self.0.as_str();
        if matches!(s, "." | "..")
            || ["./", "../", ".\\", "..\\"]
                .iter()
                .any(|prefix| s.starts_with(prefix))
        {
            RequestKind::Relative
        } else if Path::new(s).is_absolute() || s.starts_with('/') {
            RequestKind::Absolute
        } else {
            RequestKind::Bare
        }
    }

    pub fn is_relative(&self) -> bool { self.kind() == RequestKind::Relative }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Request {
    fn from(s: &str) -> Self { Self::new(s) }
}

/// Where a request is made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Requesting module, if the request comes from a file.
    pub filename:     Option<PathBuf>,
    /// Directory relative requests are resolved against.
    pub dir:          PathBuf,
    /// Ordered directories searched for bare requests.
    pub search_paths: Vec<PathBuf>,
}

impl Context {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            filename:     None,
            dir:          dir.into(),
            search_paths: Vec::new(),
        }
    }

    pub fn from_file(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            filename: Some(file),
            dir,
            search_paths: Vec::new(),
        }
    }

    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind() {
        assert_eq!(Request::from("./a").kind(), RequestKind::Relative);
        assert_eq!(Request::from("../a/b").kind(), RequestKind::Relative);
        assert_eq!(Request::from("..").kind(), RequestKind::Relative);
        assert_eq!(Request::from("/abs/a").kind(), RequestKind::Absolute);
        assert_eq!(Request::from("alpha").kind(), RequestKind::Bare);
        assert_eq!(Request::from("@s/beta/lib").kind(), RequestKind::Bare);
        assert_eq!(Request::from(".hidden").kind(), RequestKind::Bare);
    }

    #[test]
    fn test_context_from_file() {
        let ctx = Context::from_file("/p/node_modules/a/index.js");
        assert_eq!(ctx.dir, PathBuf::from("/p/node_modules/a"));
        assert_eq!(ctx.filename, Some(PathBuf::from("/p/node_modules/a/index.js")));
        assert!(ctx.search_paths.is_empty());
    }
}
