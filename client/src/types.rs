//! Client data types: transport requests, wire bodies and dashboards

use std::fmt;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use rp_shared::{ItemStatus, ItemType, KeyValuePair, LaunchMode, LogLevel};

/// Index of a test item inside the arena owned by its launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub(crate) usize);

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Local lifecycle of a launch or test item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Started,
    Finished,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Created => write!(f, "created"),
            LifecycleState::Started => write!(f, "started"),
            LifecycleState::Finished => write!(f, "finished"),
        }
    }
}

/// Request handed to the transport
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body,
        }
    }

    pub fn put(url: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Parts are sent in order under a generated boundary
    Multipart(Vec<FormPart>),
}

/// One part of a `multipart/form-data` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Response as seen by the client: status plus the fully read body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Body of a start item request
#[derive(Debug, Serialize)]
pub(crate) struct StartItemRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub start_time: i64,
    pub launch_id: &'a str,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub parameters: &'a [KeyValuePair],
}

/// Body of a start launch request
#[derive(Debug, Serialize)]
pub(crate) struct StartLaunchRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub start_time: i64,
    pub mode: LaunchMode,
}

/// Body of finish requests for items and launches
#[derive(Debug, Serialize)]
pub(crate) struct FinishRequest {
    pub end_time: i64,
    pub status: ItemStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateItemRequest<'a> {
    pub description: &'a str,
    pub tags: &'a [String],
}

/// Log entry without a file
#[derive(Debug, Serialize)]
pub(crate) struct LogRequest<'a> {
    pub item_id: &'a str,
    pub message: &'a str,
    pub level: LogLevel,
    pub time: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileInfo<'a> {
    pub name: &'a str,
}

/// Log entry inside the `json_request_part` of a multipart log request
#[derive(Debug, Serialize)]
pub(crate) struct LogWithFileRequest<'a> {
    pub file: FileInfo<'a>,
    pub item_id: &'a str,
    pub level: LogLevel,
    pub message: &'a str,
    pub time: i64,
}

/// Identifier returned by the service when an entity is created
#[derive(Debug, Deserialize)]
pub(crate) struct EntryCreated {
    pub id: String,
}

/// Widget placement on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(rename = "widgetId", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "widgetSize", default, deserialize_with = "null_as_default")]
    pub size: Vec<i32>,
    #[serde(rename = "widgetPosition", default, deserialize_with = "null_as_default")]
    pub position: Vec<i32>,
}

/// Dashboard description as listed for a project
///
/// Missing or null fields decode to their empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub share: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub widgets: Vec<Widget>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
