//! Trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::ReportResult;
use crate::types::{ApiRequest, ApiResponse};

/// HTTP transport used by every reporting operation
///
/// Implementations send exactly one request, attach the token as a bearer
/// credential and return the status with the fully read body. They never retry.
#[mockall::automock]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a single request
    async fn do_request(&self, request: ApiRequest, token: &str) -> ReportResult<ApiResponse>;
}
