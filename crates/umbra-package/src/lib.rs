//! Package model shared by the mirror builder and the resolution engine.
//!
//! The dependency tree is read-only to Umbra: descriptors are parsed
//! leniently and a descriptor that cannot be parsed is treated as absent.

pub use context::PackageContext;
pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use layout::Layout;

mod context;
mod descriptor;
mod error;
mod layout;
