//! Error types shared by the query, transport and BLAST layers

use thiserror::Error;

/// Main error type for seqseek operations
#[derive(Error, Debug)]
pub enum SeqseekError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{endpoint} returned HTTP {status}")]
    Transport { endpoint: String, status: u16 },

    #[error("No results found for '{0}'")]
    EmptyResult(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("BLAST submission failed: {0}")]
    Submission(String),

    #[error("BLAST job {rid} failed: {reason}")]
    JobFailed { rid: String, reason: String },

    #[error("BLAST job {rid} still waiting after {polls} status checks")]
    Timeout { rid: String, polls: u32 },

    #[error("Invalid job transition: {0}")]
    InvalidTransition(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for seqseek operations
pub type Result<T> = std::result::Result<T, SeqseekError>;

impl From<serde_json::Error> for SeqseekError {
    fn from(err: serde_json::Error) -> Self {
        SeqseekError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for SeqseekError {
    fn from(err: reqwest::Error) -> Self {
        SeqseekError::Network(err.to_string())
    }
}

impl From<url::ParseError> for SeqseekError {
    fn from(err: url::ParseError) -> Self {
        SeqseekError::Config(format!("invalid URL: {}", err))
    }
}

impl SeqseekError {
    /// Whether the error is a user-facing warning rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, SeqseekError::EmptyResult(_))
    }
}
