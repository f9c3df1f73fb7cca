use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};
use umbra_fs::{LineEnding, Scope, copy_binary, copy_text, is_copy_of};
use umbra_package::{Descriptor, PackageContext};
use umbra_platform::PlatformTag;

use crate::classify::{Decision, classify};
use crate::error::{Error, Result};
use crate::{MirrorReport, TraversalPolicy};

/// Package state carried down the walk.
#[derive(Debug, Clone)]
struct Frame {
    ctx:     PackageContext,
    /// The cached descriptor of the enclosing package is missing, unreadable
    /// or reports another version, so its files must be refreshed.
    changed: bool,
}

/// One-shot mirror pass from a source tree into a shadow tree.
///
/// Not safe to run concurrently against the same shadow tree.
pub struct MirrorBuilder<'a> {
    source:   PathBuf,
    portable: Scope<'static>,
    binary:   Scope<'static>,
    tag:      &'a PlatformTag,
    policy:   &'a TraversalPolicy,
}

impl<'a> MirrorBuilder<'a> {
    pub fn new(
        source: impl Into<PathBuf>,
        shadow: impl Into<PathBuf>,
        tag: &'a PlatformTag,
        policy: &'a TraversalPolicy,
    ) -> Self {
        let shadow = shadow.into();
        Self {
            source: source.into(),
            binary: Scope::new(shadow.join(tag.as_str())),
            portable: Scope::new(shadow),
            tag,
            policy,
        }
    }

    pub fn portable_root(&self) -> &Path { self.portable.path() }

    pub fn binary_root(&self) -> &Path { self.binary.path() }

    pub fn run(&self) -> Result<MirrorReport> {
        if !self.source.is_dir() {
            return Err(Error::NoSource(self.source.clone()));
        }
        if self.source.starts_with(self.portable_root()) {
            return Err(Error::ShadowContainsSource {
                shadow:      self.portable_root().to_path_buf(),
                source_root: self.source.clone(),
            });
        }

        let mut report = MirrorReport::default();
        let root = Frame {
            ctx:     PackageContext::root(),
            changed: false,
        };
        self.walk(Path::new(""), &root, &mut report)?;

        info!(
            source = %self.source.display(),
            shadow = %self.portable_root().display(),
            tag = %self.tag,
            "{report}"
        );
        Ok(report)
    }

    fn walk(&self, rel: &Path, parent: &Frame, report: &mut MirrorReport) -> Result<()> {
        let dir = self.source.join(rel);
        let layout = self.policy.get_layout();

        let descriptor = Descriptor::read(layout.descriptor_in(&dir))?;
        let frame = match &descriptor {
            Some(source_desc) => {
                let cached = Descriptor::load(layout.descriptor_in(&self.portable.join(rel)?));
                let changed = cached.is_none_or(|c| c.version != source_desc.version);
                if changed {
                    debug!(package = %rel.display(), version = ?source_desc.version, "package changed");
                }
                Frame {
                    ctx: parent.ctx.with_descriptor(source_desc),
                    changed,
                }
            }
            None => parent.clone(),
        };

        let mut entries = fs::read_dir(&dir)
            .and_then(|iter| iter.collect::<std::io::Result<Vec<_>>>())
            .map_err(|e| Error::Walk {
                path:   dir.clone(),
                source: e,
            })?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let child = rel.join(&name);
            let file_type = entry.file_type().map_err(|e| Error::Walk {
                path:   entry.path(),
                source: e,
            })?;

            if file_type.is_dir() {
                if entry.path().starts_with(self.portable_root()) {
                    trace!(dir = %child.display(), "not descending into shadow tree");
                    continue;
                }
                if !self.policy.descends_into(&name) {
                    trace!(dir = %child.display(), "excluded directory");
                    continue;
                }
                if layout.is_boundary(&name) {
                    let inner = Frame {
                        ctx:     frame.ctx.enter_boundary(),
                        changed: frame.changed,
                    };
                    self.walk(&child, &inner, report)?;
                } else {
                    self.walk(&child, &frame, report)?;
                }
            } else if file_type.is_file() {
                // Written after the rest of the package.
                if descriptor.is_some() && layout.is_descriptor(&name) {
                    continue;
                }
                self.mirror_file(&child, &frame, report)?;
            } else {
                trace!(entry = %child.display(), "skipping non-regular entry");
            }
        }

        if descriptor.is_some() {
            self.mirror_descriptor(rel, &frame, report)?;
        }
        Ok(())
    }

    fn mirror_file(&self, rel: &Path, frame: &Frame, report: &mut MirrorReport) -> Result<()> {
        let decision = classify(rel, self.policy, self.tag);
        let admitted = match decision {
            Decision::Skip => {
                trace!(file = %rel.display(), "not a mirrored file type");
                report.skipped += 1;
                return Ok(());
            }
            Decision::CopyToPortable => self.policy.admits(&frame.ctx),
            Decision::CopyToBinary => self.policy.admits_binary(&frame.ctx),
        };
        if !admitted {
            trace!(file = %rel.display(), depth = frame.ctx.depth, "package kept out of cache");
            report.skipped += 1;
            return Ok(());
        }

        let (dest, ending, binary) = match decision {
            Decision::CopyToBinary => (self.binary.join(rel)?, LineEnding::Preserve, true),
            _ => (self.portable.join(rel)?, self.policy.get_line_ending(), false),
        };
        report.observe(&dest);

        let src = self.source.join(rel);
        if !frame.changed && dest.is_file() {
            // Versioned packages are trusted by version; others by content.
            if frame.ctx.version.is_some() || is_copy_of(&src, &dest, ending)? {
                report.unchanged += 1;
                return Ok(());
            }
        }

        if binary {
            report.bytes_written += copy_binary(&src, &dest)?;
            report.binary_written += 1;
        } else {
            report.bytes_written += copy_text(&src, &dest, ending)?;
            report.portable_written += 1;
        }
        debug!(src = %rel.display(), dest = %dest.display(), "mirrored");
        Ok(())
    }

    fn mirror_descriptor(&self, rel: &Path, frame: &Frame, report: &mut MirrorReport) -> Result<()> {
        if !self.policy.admits(&frame.ctx) {
            report.skipped += 1;
            return Ok(());
        }

        let layout = self.policy.get_layout();
        let dest = layout.descriptor_in(&self.portable.join(rel)?);
        report.observe(&dest);

        if !frame.changed {
            report.unchanged += 1;
            return Ok(());
        }

        let src = layout.descriptor_in(&self.source.join(rel));
        report.bytes_written += copy_text(&src, &dest, self.policy.get_line_ending())?;
        report.descriptors_written += 1;
        debug!(dest = %dest.display(), version = ?frame.ctx.version, "mirrored descriptor");
        Ok(())
    }
}
