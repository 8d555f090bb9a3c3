//! Common test utilities for the client integration tests
//!
//! Spins up a wiremock server standing in for the report portal and helps
//! pick apart the multipart bodies it receives.

use std::sync::Arc;

use rp_client::{ConnectionConfig, ReportClient};
use wiremock::MockServer;

pub const PROJECT: &str = "demo";
pub const TOKEN: &str = "secret-token";

/// Mock server plus a client pointed at it
pub struct TestPortal {
    pub server: MockServer,
    pub client: Arc<ReportClient>,
}

impl TestPortal {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let config = ConnectionConfig::new(server.uri(), PROJECT, TOKEN, 1);
        let client = Arc::new(ReportClient::new(config).expect("client should build"));
        Self { server, client }
    }

    /// Path of a project-scoped resource as seen by the server
    pub fn project_path(&self, resource: &str) -> String {
        format!("/api/v1/{PROJECT}/{resource}")
    }
}

/// One part of a received multipart body
#[derive(Debug)]
pub struct ReceivedPart {
    /// Header block, lowercased for case-insensitive checks
    pub headers: String,
    pub body: String,
}

/// Split a `multipart/form-data` body into its parts, in order
pub fn split_multipart(body: &[u8]) -> Vec<ReceivedPart> {
    let text = String::from_utf8_lossy(body);
    let boundary_line = text.lines().next().expect("multipart body should not be empty");
    assert!(boundary_line.starts_with("--"), "body should open with a boundary");

    text.split(boundary_line)
        .filter(|segment| !segment.is_empty() && !segment.starts_with("--"))
        .map(|segment| {
            let segment = segment.trim_start_matches("\r\n");
            let (headers, body) = segment
                .split_once("\r\n\r\n")
                .expect("part should separate headers from body");
            ReceivedPart {
                headers: headers.to_lowercase(),
                body: body.trim_end_matches("\r\n").to_string(),
            }
        })
        .collect()
}
