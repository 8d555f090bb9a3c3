//! Shared types for the report portal client
//!
//! Wire enumerations, timestamp conversion, error types and tracing setup
//! used by the client crate and its binaries.

pub mod types;
pub mod errors;
pub mod logging;
pub mod time;

pub use types::*;
pub use errors::*;
pub use time::{to_timestamp, now_timestamp};
