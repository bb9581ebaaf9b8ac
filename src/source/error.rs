//! Error types for status polling.

use thiserror::Error;

/// Errors that can occur while fetching a status snapshot.
///
/// None of these are fatal: the poller logs them, records the message for
/// the status bar, and keeps the last good snapshot on screen.
#[derive(Debug, Error)]
pub enum PollError {
    /// Could not reach the status endpoint.
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("status endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not a valid snapshot.
    #[error("malformed status body: {0}")]
    Parse(String),

    /// Timeout waiting for response.
    #[error("request timed out")]
    Timeout,

    /// Reading a status file failed.
    #[error("read error: {0}")]
    Io(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for PollError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PollError::Timeout
        } else if err.is_decode() {
            PollError::Parse(err.to_string())
        } else {
            PollError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        PollError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        PollError::Io(err.to_string())
    }
}
