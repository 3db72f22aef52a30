//! Sync error types.

use thiserror::Error;

use crate::models::DraftError;
use crate::validation::ValidationErrors;

/// Errors from a remote operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// The request could not be completed (connection refused, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("Server rejected the operation with status {status}")]
    Rejected { status: u16 },
    /// A success response whose body could not be decoded.
    #[error("Failed to decode server response: {0}")]
    Decode(String),
    /// The draft could not be turned into a request body.
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),
}

impl SyncError {
    /// Transport failures and rejections are one opaque "operation failed"
    /// outcome; this is the message users see for either.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Transport(_) | SyncError::Rejected { .. } => "Operation failed".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors from submitting a form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("No form is open")]
    NoActiveForm,
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("No field has been changed")]
    Pristine,
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Sync(#[from] SyncError),
}
