// src/error.rs
// =============================================================================
// Typed errors for the parts of the crawler that callers may want to match on.
//
// - FetchError: why one page could not be downloaded. Always local to a
//   single task; it is logged and the task ends.
// - ConfigError: why a run could not start at all.
//
// main.rs wraps both in anyhow::Error for printing.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered, but not with a 2xx status
    #[error("HTTP {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    Redirect,

    #[error("connection failed: {0}")]
    Connect(String),

    /// Anything else reqwest reports (bad body encoding, protocol errors, ...)
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::Redirect
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },
}
