//! Launch: root of a reporting session and owner of its test item tree

use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;
use tracing::{debug, info};

use rp_shared::time::format_elapsed;
use rp_shared::{now_timestamp, to_timestamp, ItemStatus, LaunchMode, LogLevel};

use crate::client::{decode, json_body, ReportClient};
use crate::core::attachment::{encode_log_parts, Attachment};
use crate::core::item::TestItem;
use crate::error::{ReportError, ReportResult};
use crate::types::{
    ApiRequest, EntryCreated, FinishRequest, ItemKey, LifecycleState, LogRequest, RequestBody,
    StartItemRequest, StartLaunchRequest, UpdateItemRequest,
};

/// A reporting session
///
/// The launch owns every [`TestItem`] reported in the run. Items refer to
/// their parent by [`ItemKey`], and a parent is always added before its
/// children, so the tree is built top-down.
pub struct Launch {
    id: Option<String>,
    name: String,
    description: String,
    tags: Vec<String>,
    mode: LaunchMode,
    state: LifecycleState,
    client: Arc<ReportClient>,
    items: Vec<TestItem>,
}

impl Launch {
    /// Create a launch that still has to be started
    pub fn new(client: Arc<ReportClient>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            mode: LaunchMode::Default,
            state: LifecycleState::Created,
            client,
            items: Vec::new(),
        }
    }

    /// Report into a launch that already exists on the service
    pub fn attach(client: Arc<ReportClient>, id: impl Into<String>) -> Self {
        let mut launch = Self::new(client, String::new());
        launch.id = Some(id.into());
        launch.state = LifecycleState::Started;
        launch
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode(mut self, mode: LaunchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn client(&self) -> &Arc<ReportClient> {
        &self.client
    }

    /// Start the launch and store the id assigned by the service
    pub async fn start(&mut self) -> ReportResult<()> {
        if self.state != LifecycleState::Created {
            return Err(ReportError::InvalidState {
                what: self.describe(),
                state: self.state,
                action: "start",
            });
        }

        let url = self.client.config().project_url("launch");
        let body = json_body(&StartLaunchRequest {
            name: &self.name,
            description: &self.description,
            tags: &self.tags,
            start_time: now_timestamp(),
            mode: self.mode,
        })?;

        let response = self
            .client
            .execute("start launch", ApiRequest::post(url.clone(), body), StatusCode::CREATED)
            .await?;
        let id = created_id(decode(&response, &url)?, &url)?;

        info!("Launch '{}' started with id {}", self.name, id);
        self.id = Some(id);
        self.state = LifecycleState::Started;
        Ok(())
    }

    /// Finish the launch with a final status
    pub async fn finish(&mut self, status: ItemStatus) -> ReportResult<()> {
        self.close("finish", status).await
    }

    /// Stop the launch early, reporting it as stopped
    pub async fn stop(&mut self) -> ReportResult<()> {
        self.close("stop", ItemStatus::Stopped).await
    }

    async fn close(&mut self, action: &'static str, status: ItemStatus) -> ReportResult<()> {
        let id = self.started_id()?.to_string();
        let url = self.client.config().project_url(&format!("launch/{id}/{action}"));
        let body = json_body(&FinishRequest {
            end_time: now_timestamp(),
            status,
        })?;

        let operation = if action == "stop" { "stop launch" } else { "finish launch" };
        self.client
            .execute(operation, ApiRequest::put(url, body), StatusCode::OK)
            .await?;

        info!("Launch {} closed ({}) with status {}", id, action, status);
        self.state = LifecycleState::Finished;
        Ok(())
    }

    /// Add an item to the tree, returning its key
    ///
    /// The parent, if any, must already be part of this launch.
    pub fn add_item(&mut self, item: TestItem) -> ReportResult<ItemKey> {
        if let Some(parent) = item.parent() {
            if parent.0 >= self.items.len() {
                return Err(ReportError::UnknownItem(parent));
            }
        }
        if item.state() != LifecycleState::Created {
            return Err(ReportError::InvalidState {
                what: format!("item '{}'", item.name()),
                state: item.state(),
                action: "add",
            });
        }

        let key = ItemKey(self.items.len());
        debug!("Added {} '{}' as {}", item.item_type(), item.name(), key);
        self.items.push(item);
        Ok(key)
    }

    pub fn item(&self, key: ItemKey) -> Option<&TestItem> {
        self.items.get(key.0)
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemKey, &TestItem)> + '_ {
        self.items.iter().enumerate().map(|(i, item)| (ItemKey(i), item))
    }

    /// Direct children of an item
    pub fn children(&self, key: ItemKey) -> impl Iterator<Item = ItemKey> + '_ {
        self.items()
            .filter(move |(_, item)| item.parent() == Some(key))
            .map(|(child, _)| child)
    }

    /// Items placed directly under the launch
    pub fn roots(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items()
            .filter(|(_, item)| item.parent().is_none())
            .map(|(key, _)| key)
    }

    /// Start an item under its parent, or at the launch root
    pub async fn start_item(&mut self, key: ItemKey) -> ReportResult<()> {
        let item = self.lookup(key)?;
        if item.state() != LifecycleState::Created {
            return Err(ReportError::InvalidState {
                what: format!("item '{}'", item.name()),
                state: item.state(),
                action: "start",
            });
        }
        let launch_id = self.started_id()?;

        let url = match item.parent() {
            Some(parent_key) => {
                let parent = self.lookup(parent_key)?;
                let parent_id = parent.id().ok_or_else(|| ReportError::NotStarted {
                    what: format!("parent item '{}'", parent.name()),
                })?;
                self.client.config().project_url(&format!("item/{parent_id}"))
            }
            None => self.client.config().project_url("item"),
        };

        let start_time = Utc::now();
        let body = json_body(&StartItemRequest {
            name: item.name(),
            description: item.description(),
            tags: item.tags(),
            start_time: to_timestamp(start_time),
            launch_id,
            item_type: item.item_type(),
            parameters: item.parameters(),
        })?;

        let response = self
            .client
            .execute("start item", ApiRequest::post(url.clone(), body), StatusCode::CREATED)
            .await?;
        let id = created_id(decode(&response, &url)?, &url)?;

        let item = &mut self.items[key.0];
        info!("Started {} '{}' with id {}", item.item_type(), item.name(), id);
        item.mark_started(id, start_time);
        Ok(())
    }

    /// Finish a started item with the given status
    pub async fn finish_item(&mut self, key: ItemKey, status: ItemStatus) -> ReportResult<()> {
        let item = self.lookup(key)?;
        if item.state() == LifecycleState::Finished {
            return Err(ReportError::InvalidState {
                what: format!("item '{}'", item.name()),
                state: item.state(),
                action: "finish",
            });
        }
        let id = started_item_id(item)?;

        let url = self.client.config().project_url(&format!("item/{id}"));
        let end_time = Utc::now();
        let body = json_body(&FinishRequest {
            end_time: to_timestamp(end_time),
            status,
        })?;

        self.client
            .execute("finish item", ApiRequest::put(url, body), StatusCode::OK)
            .await?;

        let item = &mut self.items[key.0];
        match item.start_time() {
            Some(start) => info!(
                "Finished '{}' with status {} after {}",
                item.name(),
                status,
                format_elapsed(start, end_time)
            ),
            None => info!("Finished '{}' with status {}", item.name(), status),
        }
        item.mark_finished();
        Ok(())
    }

    /// Send a log message for an item, optionally with a file
    pub async fn log(
        &self,
        key: ItemKey,
        message: &str,
        level: LogLevel,
        attachment: Option<Attachment>,
    ) -> ReportResult<()> {
        let item_id = started_item_id(self.lookup(key)?)?;
        let url = self.client.config().project_url("log");
        let time = now_timestamp();

        let body = match attachment {
            Some(attachment) => {
                debug!("Attaching '{}' to log of item {}", attachment.name, item_id);
                RequestBody::Multipart(encode_log_parts(item_id, message, level, time, attachment).await?)
            }
            None => json_body(&LogRequest {
                item_id,
                message,
                level,
                time,
            })?,
        };

        self.client
            .execute("log", ApiRequest::post(url, body), StatusCode::CREATED)
            .await?;
        Ok(())
    }

    /// Replace description and tags of a started item
    ///
    /// Local fields change only after the service accepts the update.
    pub async fn update_item(
        &mut self,
        key: ItemKey,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> ReportResult<()> {
        let description = description.into();
        let id = started_item_id(self.lookup(key)?)?;
        let url = self.client.config().project_url(&format!("item/{id}/update"));
        let body = json_body(&UpdateItemRequest {
            description: &description,
            tags: &tags,
        })?;

        self.client
            .execute("update item", ApiRequest::put(url, body), StatusCode::OK)
            .await?;

        self.items[key.0].apply_update(description, tags);
        Ok(())
    }

    fn lookup(&self, key: ItemKey) -> ReportResult<&TestItem> {
        self.items.get(key.0).ok_or(ReportError::UnknownItem(key))
    }

    fn started_id(&self) -> ReportResult<&str> {
        match (self.state, self.id.as_deref()) {
            (LifecycleState::Started, Some(id)) => Ok(id),
            (LifecycleState::Finished, _) => Err(ReportError::InvalidState {
                what: self.describe(),
                state: self.state,
                action: "report into",
            }),
            _ => Err(ReportError::NotStarted { what: self.describe() }),
        }
    }

    fn describe(&self) -> String {
        match (&self.id, self.name.is_empty()) {
            (Some(id), true) => format!("launch {id}"),
            _ => format!("launch '{}'", self.name),
        }
    }
}

fn started_item_id(item: &TestItem) -> ReportResult<&str> {
    item.id().ok_or_else(|| ReportError::NotStarted {
        what: format!("item '{}'", item.name()),
    })
}

fn created_id(created: EntryCreated, url: &str) -> ReportResult<String> {
    if created.id.is_empty() {
        return Err(ReportError::Decode {
            url: url.to_string(),
            message: "service returned an empty id".to_string(),
        });
    }
    Ok(created.id)
}
