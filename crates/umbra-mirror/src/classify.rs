use std::path::Path;

use umbra_platform::PlatformTag;

use crate::TraversalPolicy;

/// Where a source file goes during a mirror pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    CopyToPortable,
    CopyToBinary,
    Skip,
}

/// Classify a file by extension.
///
/// Native artifacts whose path already names the live tag are portable: they
/// were platform-qualified by their package and can sit in the shared zone.
pub fn classify(rel: &Path, policy: &TraversalPolicy, tag: &PlatformTag) -> Decision {
    let is_descriptor = rel
        .file_name()
        .is_some_and(|name| policy.get_layout().is_descriptor(name));
    if is_descriptor {
        return Decision::CopyToPortable;
    }

    let Some(ext) = rel.extension() else {
        return Decision::Skip;
    };
    let ext = ext.to_string_lossy().to_ascii_lowercase();

    if policy.is_binary_ext(&ext) {
        if tag.qualifies(rel) {
            Decision::CopyToPortable
        } else {
            Decision::CopyToBinary
        }
    } else if policy.is_portable_ext(&ext) {
        Decision::CopyToPortable
    } else {
        Decision::Skip
    }
}
