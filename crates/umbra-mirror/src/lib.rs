//! Mirror builder: walks a source dependency tree and brings its shadow tree
//! up to date.
//!
//! The shadow tree has two zones. Platform-independent text goes to
//! `<shadow>/<relative path>`; compiled artifacts go to
//! `<shadow>/<platform tag>/<relative path>`. A pass only writes what changed,
//! so running it twice in a row performs no writes the second time.

pub use builder::MirrorBuilder;
pub use classify::{Decision, classify};
pub use error::{Error, Result};
pub use policy::TraversalPolicy;
pub use report::MirrorReport;

mod builder;
mod classify;
mod error;
mod policy;
mod report;
