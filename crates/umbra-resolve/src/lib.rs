//! Module resolution with shadow-tree fallbacks.
//!
//! # Architecture
//!
//! The host's own lookup is injected as a [`Resolve`] implementation. A
//! [`ShadowResolver`] composes it into a [`Chain`] of stages:
//!
//! 1. the host lookup against the original context,
//! 2. a remembered redirect, if its package version still matches,
//! 3. the host lookup re-rooted at the portable zone,
//! 4. the host lookup re-rooted at the binary zone of the live platform tag.
//!
//! Only "not found" advances the chain. Any other failure ends resolution.

pub use chain::Chain;
pub use context::{Context, Request, RequestKind};
pub use engine::ShadowResolver;
pub use error::{Error, Result};
pub use host::FsResolver;
pub use resolve::Resolve;
pub use stage::{Original, Recorded, Remember, ZoneFallback};
pub use zones::{Zone, Zones, normalize};

mod chain;
mod context;
mod engine;
mod error;
mod host;
mod resolve;
mod stage;
mod zones;
