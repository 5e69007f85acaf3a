use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("JSON source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid JSON in {origin}: {error}")]
    Parse {
        origin: String,
        error: Arc<serde_json::Error>,
    },
    #[error("JSON encoding failed: {0}")]
    Encode(Arc<serde_json::Error>),
    #[error("I/O failed: {0}")]
    Io(Arc<io::Error>),
}

impl Error {
    /// Whether the error comes from a remote fetch.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}
