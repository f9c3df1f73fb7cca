pub mod atomic_write;
pub mod copy;
pub mod ensure_dir;

pub use atomic_write::{AtomicWriteOptions, atomic_read, atomic_write};
pub use copy::{LineEnding, copy_binary, copy_text, is_copy_of};
pub use ensure_dir::ensure_dir;
