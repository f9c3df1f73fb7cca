use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no major.minor runtime version in '{0}'")]
    UnknownRuntime(String),

    #[error("runtime probe '{cmd}' failed: {source}")]
    CommandFailed {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("runtime probe '{cmd}' exited with {status}")]
    CommandStatus { cmd: String, status: std::process::ExitStatus },
}
