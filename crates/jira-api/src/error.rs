//! Error types for the Jira client.

use thiserror::Error;

/// Errors that can occur while talking to the Jira REST API.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure reaching the instance, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira responded with a non-success status.
    #[error("Jira API error: {status}: {body}")]
    Api {
        /// HTTP status returned by Jira.
        status: reqwest::StatusCode,
        /// Response body, usually a JSON error document.
        body: String,
    },

    /// The requested issue or resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required configuration value is missing.
    #[error("Missing required environment variable: {0}")]
    Config(&'static str),
}

/// Result type for Jira client operations.
pub type Result<T> = std::result::Result<T, Error>;
