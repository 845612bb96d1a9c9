//! Errors surfaced by external-service clients.
//!
//! Behaviours convert every one of these into either a sentinel value or
//! an early payload-less return; they never propagate out of a task.

/// External-call error types.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("empty or undecodable response body: {0}")]
    Body(String),

    #[error("content storage error: {0}")]
    Storage(String),

    #[error("contract error: {0}")]
    Contract(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClientError::Status(status.as_u16()),
            None => ClientError::Transport(err.to_string()),
        }
    }
}
