use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to encode redirect record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Fs(#[from] umbra_fs::Error),
}
