use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No known game build matches checksum {0}")]
    UnknownBuild(String),

    #[error("No patches found for game build '{0}'")]
    NoPatchesFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if let Some(status) = e.status() {
            format!("HTTP {} error: {}", status.as_u16(), e)
        } else {
            format!("HTTP error: {}", e)
        };
        Error::Http(message)
    }
}
