//! Shared error types for the reporting client

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid {kind}: {input}")]
    InvalidValue { kind: &'static str, input: String },
}
