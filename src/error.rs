//! Error taxonomy shared by the catalog and commit paths.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FileDockError>;

/// Appended to host messages for a 401 response.
pub(crate) const REJECTED_TOKEN_NOTE: &str = "token invalid or expired";

#[derive(Debug, Error)]
pub enum FileDockError {
    /// A read against the host failed (transport error, non-success status, or
    /// an unreadable body).
    #[error("fetch {what} failed: {message}")]
    Fetch { what: String, message: String },

    /// A write step was rejected by the host. Carries the host's own message.
    #[error("{step} failed: {message}")]
    RemoteWrite { step: String, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),
}

impl FileDockError {
    pub fn fetch(what: impl Into<String>, message: impl Into<String>) -> Self {
        FileDockError::Fetch {
            what: what.into(),
            message: message.into(),
        }
    }

    pub fn remote_write(step: impl Into<String>, message: impl Into<String>) -> Self {
        FileDockError::RemoteWrite {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        FileDockError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FileDockError::NotFound(_))
    }

    /// True when the host answered 401 to a read or a write step.
    pub fn is_rejected_token(&self) -> bool {
        match self {
            FileDockError::Fetch { message, .. } | FileDockError::RemoteWrite { message, .. } => {
                message.ends_with(&format!("({})", REJECTED_TOKEN_NOTE))
            }
            _ => false,
        }
    }
}
