//! Reference filesystem resolver.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use umbra_package::{Descriptor, Layout};

use crate::zones::normalize;
use crate::{Context, Error, Request, RequestKind, Resolve, Result};

/// Conventional lookup on the real filesystem.
///
/// Relative and absolute requests resolve by position: the exact file, then
/// the file with each extension appended, then the directory (descriptor
/// `main`, then `index.<ext>`). Bare requests repeat that under each search
/// path in order.
#[derive(Debug, Clone)]
pub struct FsResolver {
    extensions: Vec<String>,
    layout:     Layout,
}

impl Default for FsResolver {
    fn default() -> Self {
        Self {
            extensions: vec![".js".into(), ".json".into(), ".node".into()],
            layout:     Layout::default(),
        }
    }
}

impl FsResolver {
    pub fn new() -> Self { Self::default() }

    pub fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    fn resolve_path(&self, base: &Path) -> Option<PathBuf> {
        self.resolve_file(base).or_else(|| self.resolve_directory(base))
    }

    fn resolve_file(&self, base: &Path) -> Option<PathBuf> {
        if base.is_file() {
            return Some(base.to_path_buf());
        }
        self.extensions
            .iter()
            .map(|ext| with_suffix(base, ext))
            .find(|candidate| candidate.is_file())
    }

    fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        if !dir.is_dir() {
            return None;
        }
        let main = Descriptor::load(self.layout.descriptor_in(dir))
            .and_then(|d| d.main)
            .map(|main| dir.join(main));
        main.and_then(|main| self.resolve_file(&main).or_else(|| self.resolve_index(&main)))
            .or_else(|| self.resolve_index(dir))
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        self.extensions
            .iter()
            .map(|ext| dir.join(format!("index{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

impl Resolve for FsResolver {
    fn resolve(&self, request: &Request, context: &Context) -> Result<PathBuf> {
        let spec = request.as_str();
        if spec.is_empty() || spec.contains('\0') {
            return Err(Error::InvalidRequest(spec.to_string()));
        }

        let found = match request.kind() {
            RequestKind::Relative => self.resolve_path(&normalize(&context.dir.join(spec))),
            RequestKind::Absolute => self.resolve_path(&normalize(Path::new(spec))),
            RequestKind::Bare => context
                .search_paths
                .iter()
                .find_map(|dir| self.resolve_path(&dir.join(spec))),
        };
        found
            .map(|path| normalize(&path))
            .ok_or_else(|| Error::not_found(spec, &context.dir))
    }

    fn name(&self) -> &str { "fs" }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
