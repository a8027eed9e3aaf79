use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed returned status {0}")]
    Status(StatusCode),
    #[error("malformed feed payload: {0}")]
    Decode(#[from] serde_json::Error),
}
