//! Error types for the chess web client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Server rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid position `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Malformed server frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

impl From<awc::error::SendRequestError> for ClientError {
    fn from(err: awc::error::SendRequestError) -> Self {
        ClientError::Http(err.to_string())
    }
}

impl From<awc::error::JsonPayloadError> for ClientError {
    fn from(err: awc::error::JsonPayloadError) -> Self {
        ClientError::Http(err.to_string())
    }
}
