use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("source root {} is not a directory", .0.display())]
    NoSource(PathBuf),

    #[error("shadow root {} would contain the source root {}", shadow.display(), source_root.display())]
    ShadowContainsSource { shadow: PathBuf, source_root: PathBuf },

    #[error("failed to list {}: {source}", path.display())]
    Walk {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid exclusion pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source:  regex::Error,
    },

    #[error(transparent)]
    Fs(#[from] umbra_fs::Error),

    #[error(transparent)]
    Package(#[from] umbra_package::Error),
}
