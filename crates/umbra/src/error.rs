use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An ancestor of the source root holds its own dependency tree, so
    /// lookups could silently escape into it.
    #[error("ambiguous dependency root: {} is above the source root", path.display())]
    AmbiguousRoot { path: PathBuf },

    #[error("shadow root {} would contain the source root {}", shadow.display(), source_root.display())]
    ShadowContainsSource { shadow: PathBuf, source_root: PathBuf },

    #[error("no runtime version configured and no probe command given")]
    NoRuntime,

    #[error("invalid path {}: {source}", path.display())]
    Path {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {}: {source}", path.display())]
    List {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] Box<figment::Error>),

    #[error(transparent)]
    Platform(#[from] umbra_platform::Error),

    #[error(transparent)]
    Mirror(#[from] umbra_mirror::Error),

    #[error(transparent)]
    Resolve(#[from] umbra_resolve::Error),
}
