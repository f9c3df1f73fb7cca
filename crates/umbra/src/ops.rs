use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;
use umbra_mirror::{MirrorBuilder, MirrorReport};
use umbra_platform::PlatformTag;
use umbra_resolve::{Resolve, ShadowResolver, Zones};

use crate::sanity::check_root;
use crate::{Error, Options, Result};

/// Build the resolution wrapper for the tree described by `options`.
///
/// `host` is the host's own lookup. Fails before anything is built when the
/// source root sits inside another dependency tree.
pub fn configure<H>(options: &Options, host: H) -> Result<ShadowResolver>
where
    H: Resolve + 'static,
{
    let source = options.source()?;
    check_root(&source, &options.layout)?;

    let zones = Zones::new(&source, options.shadow()?, options.tag()?, options.layout.clone());
    info!(
        source = %zones.source().display(),
        shadow = %zones.shadow().display(),
        tag = %zones.tag(),
        "resolution wrapper configured"
    );
    Ok(ShadowResolver::new(host, zones))
}

/// Run one mirror pass.
pub fn run(options: &Options) -> Result<MirrorReport> {
    let source = options.source()?;
    check_root(&source, &options.layout)?;

    let shadow = options.shadow()?;
    check_shadow(&source, &shadow)?;
    let tag = options.tag()?;
    let policy = options.policy()?;
    let report = MirrorBuilder::new(&source, &shadow, &tag, &policy).run()?;
    if options.verbose {
        if let Some(path) = &report.longest_path {
            info!(len = report.longest_len(), path = %path.display(), "longest path");
        }
    }
    Ok(report)
}

/// Delete the whole shadow tree, stale binary zones included, then mirror.
pub fn rebuild(options: &Options) -> Result<MirrorReport> {
    let source = options.source()?;
    let shadow = options.shadow()?;
    check_shadow(&source, &shadow)?;

    match std::fs::remove_dir_all(&shadow) {
        Ok(()) => info!(shadow = %shadow.display(), "removed shadow tree"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::Remove { path: shadow, source: e }),
    }
    run(options)
}

/// The shadow root must not be the source root or one of its ancestors.
fn check_shadow(source: &Path, shadow: &Path) -> Result<()> {
    if source.starts_with(shadow) {
        return Err(Error::ShadowContainsSource {
            shadow:      shadow.to_path_buf(),
            source_root: source.to_path_buf(),
        });
    }
    Ok(())
}

/// A binary zone present under the shadow root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneInfo {
    pub tag:  String,
    pub path: PathBuf,
    /// Zone of the running platform.
    pub live: bool,
}

/// List binary zones, sorted by tag.
pub fn zones(options: &Options) -> Result<Vec<ZoneInfo>> {
    let shadow = options.shadow()?;
    let live = options.tag()?;

    let entries = match std::fs::read_dir(&shadow) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::List { path: shadow, source: e }),
    };

    let mut zones: Vec<ZoneInfo> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let tag = entry.file_name().into_string().ok()?;
            PlatformTag::looks_like(&tag).then(|| ZoneInfo {
                live: tag == live.as_str(),
                path: entry.path(),
                tag,
            })
        })
        .collect();
    zones.sort_by(|a, b| a.tag.cmp(&b.tag));
    Ok(zones)
}
