use std::ffi::OsStr;

use regex::Regex;
use umbra_fs::LineEnding;
use umbra_package::{Layout, PackageContext};

use crate::error::{Error, Result};

const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", "CVS"];

const PORTABLE_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "json", "coffee", "_js", "_coffee", "css",
    "html", "htm", "txt", "md", "map", "yml", "yaml", "xml", "sh", "cmd", "bat", "ini",
];

const BINARY_EXTENSIONS: &[&str] = &["node"];

/// What a mirror pass walks and what it copies.
#[derive(Debug, Clone)]
pub struct TraversalPolicy {
    layout:              Layout,
    exclude:             Vec<Regex>,
    private_depth:       usize,
    min_depth:           usize,
    portable_extensions: Vec<String>,
    binary_extensions:   Vec<String>,
    line_ending:         LineEnding,
}

impl Default for TraversalPolicy {
    fn default() -> Self { Self::new() }
}

impl TraversalPolicy {
    pub fn new() -> Self {
        Self {
            layout:              Layout::default(),
            exclude:             Vec::new(),
            private_depth:       2,
            min_depth:           1,
            portable_extensions: PORTABLE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            binary_extensions:   BINARY_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            line_ending:         LineEnding::Native,
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Directory-name patterns that are never descended into.
    pub fn exclude<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let re = Regex::new(pattern).map_err(|e| Error::Pattern {
                pattern: pattern.to_string(),
                source:  e,
            })?;
            self.exclude.push(re);
        }
        Ok(self)
    }

    /// Boundary depth from which private packages are mirrored anyway.
    pub fn private_depth(mut self, depth: usize) -> Self {
        self.private_depth = depth;
        self
    }

    /// Boundary depth below which nothing is mirrored.
    pub fn min_depth(mut self, depth: usize) -> Self {
        self.min_depth = depth;
        self
    }

    pub fn portable_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.portable_extensions = extensions.into_iter().map(|e| normalize_ext(e.into())).collect();
        self
    }

    pub fn binary_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_extensions = extensions.into_iter().map(|e| normalize_ext(e.into())).collect();
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn get_layout(&self) -> &Layout { &self.layout }

    pub fn get_line_ending(&self) -> LineEnding { self.line_ending }

    pub(crate) fn is_portable_ext(&self, ext: &str) -> bool {
        self.portable_extensions.iter().any(|e| e == ext)
    }

    pub(crate) fn is_binary_ext(&self, ext: &str) -> bool {
        self.binary_extensions.iter().any(|e| e == ext)
    }

    /// Whether a directory with this name is walked at all.
    pub fn descends_into(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        if VCS_DIRS.contains(&name.as_ref()) {
            return false;
        }
        !self.exclude.iter().any(|re| re.is_match(&name))
    }

    /// Whether files of the package described by `ctx` may be mirrored.
    pub fn admits(&self, ctx: &PackageContext) -> bool {
        ctx.depth >= self.min_depth && ctx.is_shareable(self.private_depth)
    }

    /// Compiled artifacts ignore package visibility; only depth applies.
    pub fn admits_binary(&self, ctx: &PackageContext) -> bool { ctx.depth >= self.min_depth }
}

fn normalize_ext(ext: String) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
