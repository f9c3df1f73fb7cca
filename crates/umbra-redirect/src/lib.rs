//! Redirect records: advisory hints remembering where a fallback lookup
//! was satisfied.
//!
//! Records are small JSON files, one per `(requesting directory, request)`
//! pair. The store never fails on reads: a missing or malformed record is
//! simply `None`, so callers can always fall back to a full resolution.

pub use error::{Error, Result};
pub use key::RedirectKey;
pub use record::{BIN_PLACEHOLDER, Record};
pub use store::RedirectStore;

mod error;
mod key;
mod record;
mod store;
