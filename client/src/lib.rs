//! Client library for a report portal test-reporting service
//!
//! A test run creates a [`Launch`], adds a tree of [`TestItem`]s to it and
//! drives each item through start, log, update and finish. Every operation
//! is one HTTP call whose outcome is returned to the caller.

pub mod error;
pub mod config;
pub mod types;
pub mod traits;
pub mod client;
pub mod core;
pub mod services;

// Re-export main types
pub use error::{ReportError, ReportResult};
pub use config::ConnectionConfig;
pub use client::ReportClient;
pub use crate::core::{Attachment, Launch, TestItem};
pub use traits::*;
pub use types::{ApiRequest, ApiResponse, Dashboard, FormPart, ItemKey, LifecycleState, RequestBody, Widget};
pub use rp_shared::{ItemStatus, ItemType, KeyValuePair, LaunchMode, LogLevel};
