//! Report portal client: shared request plumbing and read-only endpoints

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::{ReportError, ReportResult};
use crate::services::{RealHttpTransport, DEFAULT_REQUEST_TIMEOUT};
use crate::traits::Transport;
use crate::types::{ApiRequest, ApiResponse, Dashboard, RequestBody};

/// Handle shared by a launch and all of its items
pub struct ReportClient {
    config: ConnectionConfig,
    transport: Arc<dyn Transport>,
}

impl ReportClient {
    /// Create a client with the default reqwest transport
    pub fn new(config: ConnectionConfig) -> ReportResult<Self> {
        Self::with_timeout(config, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with the default transport and a custom request timeout
    pub fn with_timeout(config: ConnectionConfig, timeout: Duration) -> ReportResult<Self> {
        let transport = RealHttpTransport::new(timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over any transport implementation
    pub fn with_transport(config: ConnectionConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Check that the endpoint is reachable and the token is accepted
    pub async fn check_connect(&self) -> ReportResult<()> {
        let url = self.config.url("user");
        self.execute("check connection", ApiRequest::get(url), StatusCode::OK)
            .await?;
        info!("Connected to {}", self.config.endpoint());
        Ok(())
    }

    /// List dashboards of the configured project
    pub async fn get_dashboards(&self) -> ReportResult<Vec<Dashboard>> {
        let url = self.config.project_url("dashboard");
        let response = self
            .execute("get dashboards", ApiRequest::get(url.clone()), StatusCode::OK)
            .await?;
        let dashboards: Vec<Dashboard> = decode(&response, &url)?;
        debug!("Found {} dashboards", dashboards.len());
        Ok(dashboards)
    }

    /// Send one request and require the given status
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        request: ApiRequest,
        expected: StatusCode,
    ) -> ReportResult<ApiResponse> {
        let url = request.url.clone();
        let response = self.transport.do_request(request, self.config.token()).await?;

        if response.status != expected {
            warn!(
                "{} at {} returned {} (expected {})",
                operation, url, response.status, expected
            );
            return Err(ReportError::UnexpectedStatus {
                operation,
                url,
                status: response.status,
            });
        }
        Ok(response)
    }
}

/// Serialize a typed body into a JSON request body
pub(crate) fn json_body<T: Serialize + std::fmt::Debug>(body: &T) -> ReportResult<RequestBody> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ReportError::Serialization {
            context: format!("{body:?}"),
            message: e.to_string(),
        })
}

/// Decode a response body, attaching the URL to failures
pub(crate) fn decode<T: DeserializeOwned>(response: &ApiResponse, url: &str) -> ReportResult<T> {
    response.json().map_err(|e| ReportError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
