use thiserror::Error;

/// Library error types for live vote operations
#[derive(Error, Debug)]
pub enum LiveVoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vote API error: {0}")]
    Api(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Invalid secret URI: {0}")]
    InvalidSecretUri(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<subxt_signer::sr25519::Error> for LiveVoteError {
    fn from(err: subxt_signer::sr25519::Error) -> Self {
        LiveVoteError::InvalidSecretUri(err.to_string())
    }
}

impl From<subxt_signer::SecretUriError> for LiveVoteError {
    fn from(err: subxt_signer::SecretUriError) -> Self {
        LiveVoteError::InvalidSecretUri(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LiveVoteError>;
