use std::path::Path;

use tracing::debug;
use umbra_package::Layout;

use crate::{Error, Result};

/// Refuse source roots nested inside another dependency tree.
///
/// If any ancestor of `source` carries a boundary directory, the host would
/// search it after the managed tree, and fallbacks would never be reached
/// for packages it happens to contain.
pub fn check_root(source: &Path, layout: &Layout) -> Result<()> {
    for ancestor in source.ancestors().skip(1) {
        let boundary = ancestor.join(&layout.boundary);
        if boundary.is_dir() {
            return Err(Error::AmbiguousRoot { path: boundary });
        }
    }
    debug!(source = %source.display(), "source root is unambiguous");
    Ok(())
}
