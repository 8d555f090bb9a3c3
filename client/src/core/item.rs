//! Test item: one node of the reported test tree

use chrono::{DateTime, Utc};

use rp_shared::{ItemType, KeyValuePair};

use crate::types::{ItemKey, LifecycleState};

/// A suite, test, step or fixture phase reported under a launch
///
/// Items live in the arena of their [`Launch`](crate::core::Launch) and are
/// driven through it. The remote id is assigned by a successful start and
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct TestItem {
    id: Option<String>,
    name: String,
    description: String,
    parent: Option<ItemKey>,
    tags: Vec<String>,
    parameters: Vec<KeyValuePair>,
    item_type: ItemType,
    start_time: Option<DateTime<Utc>>,
    state: LifecycleState,
}

impl TestItem {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            parent: None,
            tags: Vec::new(),
            parameters: Vec::new(),
            item_type,
            start_time: None,
            state: LifecycleState::Created,
        }
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

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(KeyValuePair::new(key, value));
        self
    }

    /// Place this item under another item of the same launch
    pub fn with_parent(mut self, parent: ItemKey) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<ItemKey> {
        self.parent
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn parameters(&self) -> &[KeyValuePair] {
        &self.parameters
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub(crate) fn mark_started(&mut self, id: String, start_time: DateTime<Utc>) {
        self.id = Some(id);
        self.start_time = Some(start_time);
        self.state = LifecycleState::Started;
    }

    pub(crate) fn mark_finished(&mut self) {
        self.state = LifecycleState::Finished;
    }

    pub(crate) fn apply_update(&mut self, description: String, tags: Vec<String>) {
        self.description = description;
        self.tags = tags;
    }
}
