//! Umbra keeps a shadow copy of a dependency tree and resolves module
//! lookups through it when the original tree cannot satisfy them.
//!
//! - [`run`] mirrors the source tree into the shadow tree.
//! - [`configure`] builds a [`ShadowResolver`] around the host's lookup.
//!
//! Both refuse to work on a source root nested inside another dependency
//! tree ([`Error::AmbiguousRoot`]).

pub use config::{CONFIG_FILE, DEFAULT_SHADOW_DIR, Options};
pub use error::{Error, Result};
pub use ops::{ZoneInfo, configure, rebuild, run, zones};
pub use sanity::check_root;

pub use umbra_mirror::MirrorReport;
pub use umbra_resolve::{Context, FsResolver, Request, Resolve, ShadowResolver};

mod config;
mod error;
mod ops;
mod sanity;
