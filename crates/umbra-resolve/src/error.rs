//! Error types for resolution.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Recoverable: the next stage of the chain may still succeed.
    #[error("cannot find '{request}' from {}", from.display())]
    NotFound { request: String, from: PathBuf },

    #[error("invalid request '{0}'")]
    InvalidRequest(String),
}

impl Error {
    pub fn not_found(request: impl Into<String>, from: impl Into<PathBuf>) -> Self {
        Error::NotFound {
            request: request.into(),
            from:    from.into(),
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, Error::NotFound { .. }) }
}
