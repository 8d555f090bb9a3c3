//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{ItemKey, LifecycleState};

/// Result type for reporting operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Reporting error types
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize {context}: {message}")]
    Serialization { context: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{operation} at {url} failed with status {status}")]
    UnexpectedStatus {
        operation: &'static str,
        url: String,
        status: StatusCode,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to read attachment {name}: {message}")]
    Attachment { name: String, message: String },

    #[error("{what} has not been started")]
    NotStarted { what: String },

    #[error("Cannot {action} {what}: it is {state}")]
    InvalidState {
        what: String,
        state: LifecycleState,
        action: &'static str,
    },

    #[error("Unknown test item: {0}")]
    UnknownItem(ItemKey),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// HTTP status of a protocol error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ReportError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
