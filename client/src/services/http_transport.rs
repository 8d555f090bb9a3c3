//! Transport implementation backed by reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::traits::Transport;
use crate::types::{ApiRequest, ApiResponse, FormPart, RequestBody};

/// Request timeout applied when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Real HTTP transport using a pooled reqwest client
#[derive(Clone)]
pub struct RealHttpTransport {
    client: Client,
}

impl RealHttpTransport {
    /// Create transport with the given request timeout
    pub fn new(timeout: Duration) -> ReportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for RealHttpTransport {
    async fn do_request(&self, request: ApiRequest, token: &str) -> ReportResult<ApiResponse> {
        let ApiRequest { method, url, body } = request;
        debug!("{} {}", method, url);

        let builder = self
            .client
            .request(method, url.as_str())
            .bearer_auth(token)
            .header("accept", "application/json");

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| ReportError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        // Drain the body so the connection goes back to the pool on every path
        let body = response.bytes().await.map_err(|e| ReportError::Transport {
            url: url.clone(),
            message: format!("failed to read response body: {e}"),
        })?;

        debug!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

fn build_form(parts: Vec<FormPart>) -> ReportResult<Form> {
    let mut form = Form::new();
    for part in parts {
        let mut body = Part::bytes(part.data)
            .mime_str(&part.content_type)
            .map_err(|e| ReportError::Serialization {
                context: format!("content type of part '{}'", part.name),
                message: e.to_string(),
            })?;
        if let Some(file_name) = part.file_name {
            body = body.file_name(file_name);
        }
        form = form.part(part.name, body);
    }
    Ok(form)
}
