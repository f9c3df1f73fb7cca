use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is outside of {}", path.display(), root.display())]
    OutsideScope { root: PathBuf, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
