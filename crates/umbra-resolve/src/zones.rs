//! Mapping between the source tree and the two shadow zones.

use std::path::{Component, Path, PathBuf};

use umbra_package::{Descriptor, Layout};
use umbra_platform::PlatformTag;
use umbra_redirect::{Record, RedirectKey};

use crate::{Context, Request, RequestKind};

/// Directory under the shadow root holding redirect records.
pub const REDIRECT_DIR: &str = "redir";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Portable,
    Binary,
}

/// Source root, shadow root and live platform tag of one managed tree.
#[derive(Debug, Clone)]
pub struct Zones {
    source: PathBuf,
    shadow: PathBuf,
    tag:    PlatformTag,
    layout: Layout,
}

impl Zones {
    pub fn new(
        source: impl AsRef<Path>,
        shadow: impl AsRef<Path>,
        tag: PlatformTag,
        layout: Layout,
    ) -> Self {
        Self {
            source: normalize(source.as_ref()),
            shadow: normalize(shadow.as_ref()),
            tag,
            layout,
        }
    }

    pub fn source(&self) -> &Path { &self.source }

    pub fn shadow(&self) -> &Path { &self.shadow }

    pub fn tag(&self) -> &PlatformTag { &self.tag }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn root(&self, zone: Zone) -> PathBuf {
        match zone {
            Zone::Portable => self.shadow.clone(),
            Zone::Binary => self.shadow.join(self.tag.as_str()),
        }
    }

    pub fn redirect_root(&self) -> PathBuf { self.shadow.join(REDIRECT_DIR) }

    /// Path of `dir` relative to the tree it belongs to.
    ///
    /// Directories inside either zone map back to the source-relative path
    /// they mirror. Anything outside source and shadow is unmanaged.
    pub fn relative(&self, dir: &Path) -> Option<PathBuf> {
        let dir = normalize(dir);
        let binary = self.root(Zone::Binary);
        [binary.as_path(), self.shadow.as_path(), self.source.as_path()]
            .into_iter()
            .find_map(|root| dir.strip_prefix(root).ok().map(Path::to_path_buf))
    }

    /// Rewrite `request` made from `context` into `zone`.
    ///
    /// Returns `None` when the context is not managed. Relative requests get
    /// no search paths; everything else searches the boundary directories
    /// from the rewritten location up to the zone root.
    pub fn rebase(&self, request: &Request, context: &Context, zone: Zone) -> Option<(Request, Context)> {
        let rel = self.relative(&context.dir)?;
        let root = self.root(zone);
        let dir = root.join(&rel);

        let kind = request.kind();
        let request = match kind {
            RequestKind::Absolute => {
                let target = normalize(Path::new(request.as_str()));
                match self.relative(&target) {
                    Some(inner) => Request::new(root.join(inner).to_string_lossy()),
                    None => request.clone(),
                }
            }
            _ => request.clone(),
        };

        let search_paths = match kind {
            RequestKind::Relative => Vec::new(),
            _ => self.layout.search_paths(&dir, &root),
        };
        let filename = context
            .filename
            .as_ref()
            .and_then(|f| f.file_name())
            .map(|name| dir.join(name));

        Some((
            request,
            Context {
                filename,
                dir,
                search_paths,
            },
        ))
    }

    /// Redirect key for `request` made from `context`.
    ///
    /// Absolute requests into the managed tree are keyed by their relative
    /// path, so records survive moving the checkout.
    pub fn redirect_key(&self, request: &Request, context: &Context) -> Option<RedirectKey> {
        let from = self.relative(&context.dir)?;
        let request = match request.kind() {
            RequestKind::Absolute => self
                .relative(Path::new(request.as_str()))
                .map(|rel| rel.to_string_lossy().into_owned())
                .unwrap_or_else(|| request.as_str().to_string()),
            _ => request.as_str().to_string(),
        };
        Some(RedirectKey::new(from, request))
    }

    /// Record describing a path resolved inside one of the zones.
    ///
    /// The version comes from the cached descriptor of the enclosing package.
    pub fn record_for(&self, resolved: &Path) -> Option<Record> {
        let resolved = normalize(resolved);
        let binary = self.root(Zone::Binary);
        let (rel, is_binary) = match resolved.strip_prefix(&binary) {
            Ok(rel) => (rel.to_path_buf(), true),
            Err(_) => (resolved.strip_prefix(&self.shadow).ok()?.to_path_buf(), false),
        };

        let version = self
            .layout
            .package_root(&rel)
            .and_then(|pkg| Descriptor::load(self.layout.descriptor_in(&self.shadow.join(pkg))))
            .and_then(|d| d.version);

        Some(if is_binary {
            Record::binary(version, &rel)
        } else {
            Record::portable(version, &rel)
        })
    }

    /// Live descriptor, in the source tree, of the package a record points into.
    pub fn live_descriptor(&self, record: &Record) -> Option<Descriptor> {
        let pkg = self.layout.package_root(&record.relative())?;
        Descriptor::load(self.layout.descriptor_in(&self.source.join(pkg)))
    }
}

/// Lexically remove `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            c => out.push(c.as_os_str()),
        }
    }
    out
}
