mod error;
pub mod primitives;
mod scope;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, LineEnding, atomic_read, atomic_write, copy_binary, copy_text, ensure_dir,
    is_copy_of,
};
pub use scope::Scope;
