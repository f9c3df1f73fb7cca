//! Platform identification for Umbra.
//!
//! A [`PlatformTag`] names the binary zone of a shadow tree. It combines the
//! operating-system family, the CPU architecture and the `major.minor` ABI
//! version of the embedding runtime, e.g. `linux-x64-rt-8.1`.

pub use arch::Arch;
pub use error::{Error, Result};
pub use host::HostInfo;
pub use os::OS;
pub use runtime::RuntimeVersion;
pub use tag::PlatformTag;

pub mod arch;
mod error;
pub mod host;
pub mod os;
pub mod runtime;
mod tag;
