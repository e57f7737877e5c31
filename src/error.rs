// Error types for watchtower.
// Covers GitHub API failures, credential problems, and cache I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchtowerError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Missing GITHUB_API environment variable and no explicit auth given")]
    MissingToken,

    #[error("Invalid auth {0:?}: expected user:token")]
    InvalidAuth(String),

    #[error("Could not determine a home directory for the data home")]
    MissingHome,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatchtowerError>;
