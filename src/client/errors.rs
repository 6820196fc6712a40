use thiserror::Error;

/// Remote client failures. Inside a migration run these are caught per item
/// and recorded as `Failed` outcome entries; only the verification pass and
/// direct callers see them as errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Drive API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;
