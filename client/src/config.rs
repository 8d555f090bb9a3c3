//! Connection configuration for the report portal endpoint

use std::env;

use crate::error::{ReportError, ReportResult};

pub const ENV_ENDPOINT: &str = "RP_ENDPOINT";
pub const ENV_PROJECT: &str = "RP_PROJECT";
pub const ENV_TOKEN: &str = "RP_TOKEN";
pub const ENV_API_VERSION: &str = "RP_API_VERSION";

/// Normalized endpoint, project and credential used by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    endpoint: String,
    project: String,
    token: String,
}

impl ConnectionConfig {
    /// Create a configuration, normalizing the raw endpoint
    ///
    /// A missing scheme defaults to `https://`, trailing slashes are dropped and
    /// `/api/v{api_version}` is appended unless the endpoint already carries an
    /// API path. Versions below 1 are treated as 1. Nothing is validated here:
    /// a malformed endpoint is reported by the transport when a request is made.
    pub fn new(
        endpoint: impl AsRef<str>,
        project: impl Into<String>,
        token: impl Into<String>,
        api_version: i32,
    ) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.as_ref(), api_version),
            project: project.into(),
            token: token.into(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ReportResult<Self> {
        // Try to load .env file if it exists (ignore if it doesn't)
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ReportError::Config {
                    message: format!("{key} not set"),
                })
        };

        let endpoint = require(ENV_ENDPOINT)?;
        let project = require(ENV_PROJECT)?;
        let token = require(ENV_TOKEN)?;

        let api_version = match lookup(ENV_API_VERSION) {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| ReportError::Config {
                message: format!("{ENV_API_VERSION} must be an integer, got '{raw}'"),
            })?,
            None => 1,
        };

        Ok(Self::new(endpoint, project, token, api_version))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `{endpoint}/{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// `{endpoint}/{project}/{path}`
    pub fn project_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.project, path)
    }
}

fn normalize_endpoint(raw: &str, api_version: i32) -> String {
    let trimmed = raw.trim_end_matches('/');
    let api_version = api_version.max(1);

    let mut endpoint = String::with_capacity(trimmed.len() + 16);
    if !trimmed.starts_with("https://") && !trimmed.starts_with("http://") {
        endpoint.push_str("https://");
    }
    endpoint.push_str(trimmed);

    if !trimmed.contains("/api/v") {
        endpoint.push_str("/api/v");
        endpoint.push_str(&api_version.to_string());
    }
    endpoint
}
