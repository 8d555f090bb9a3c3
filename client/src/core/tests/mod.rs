//! Tests for the reporting core
//!
//! Requests are captured through a mocked transport so URLs and bodies can be
//! checked without a server.

pub mod log_requests;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use crate::client::ReportClient;
use crate::config::ConnectionConfig;
use crate::core::Launch;
use crate::error::ReportResult;
use crate::traits::MockTransport;
use crate::types::{ApiRequest, ApiResponse, RequestBody};

pub const PROJECT_URL: &str = "https://rp.example.com/api/v1/demo";
pub const TOKEN: &str = "secret-token";

/// Requests seen by the mocked transport, with the token they carried
pub type Recorded = Arc<Mutex<Vec<(ApiRequest, String)>>>;

pub fn test_config() -> ConnectionConfig {
    ConnectionConfig::new("rp.example.com", "demo", TOKEN, 1)
}

/// Mock that answers requests from a queue and records each of them
pub fn scripted_transport(responses: Vec<ReportResult<ApiResponse>>) -> (MockTransport, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

    let mut transport = MockTransport::new();
    let sink = recorded.clone();
    transport.expect_do_request().returning(move |request, token| {
        sink.lock().unwrap().push((request, token.to_string()));
        queue
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    });

    (transport, recorded)
}

/// Mock that fails the test if any request is made
pub fn silent_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport.expect_do_request().never();
    transport
}

pub fn client_with(transport: MockTransport) -> Arc<ReportClient> {
    Arc::new(ReportClient::with_transport(test_config(), transport))
}

/// Launch already known to the service under id `launch-1`
pub fn attached_launch(transport: MockTransport) -> Launch {
    Launch::attach(client_with(transport), "launch-1")
}

pub fn created(id: &str) -> ReportResult<ApiResponse> {
    Ok(ApiResponse::new(
        StatusCode::CREATED,
        format!(r#"{{"id":"{id}"}}"#).into_bytes(),
    ))
}

pub fn ok() -> ReportResult<ApiResponse> {
    Ok(ApiResponse::new(StatusCode::OK, b"{}".to_vec()))
}

pub fn status(code: StatusCode) -> ReportResult<ApiResponse> {
    Ok(ApiResponse::new(code, b"{\"message\":\"rejected\"}".to_vec()))
}

pub fn json_of(request: &ApiRequest) -> &serde_json::Value {
    match &request.body {
        RequestBody::Json(value) => value,
        other => panic!("expected JSON body, got {other:?}"),
    }
}
