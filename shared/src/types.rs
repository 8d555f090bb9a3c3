//! Wire enumerations and small value types shared by the reporting client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Kind of node in the test tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Suite,
    Story,
    Test,
    Scenario,
    Step,
    BeforeClass,
    BeforeGroups,
    BeforeMethod,
    BeforeSuite,
    BeforeTest,
    AfterClass,
    AfterGroups,
    AfterMethod,
    AfterSuite,
    AfterTest,
}

impl ItemType {
    pub const ALL: [ItemType; 15] = [
        ItemType::Suite,
        ItemType::Story,
        ItemType::Test,
        ItemType::Scenario,
        ItemType::Step,
        ItemType::BeforeClass,
        ItemType::BeforeGroups,
        ItemType::BeforeMethod,
        ItemType::BeforeSuite,
        ItemType::BeforeTest,
        ItemType::AfterClass,
        ItemType::AfterGroups,
        ItemType::AfterMethod,
        ItemType::AfterSuite,
        ItemType::AfterTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Suite => "SUITE",
            ItemType::Story => "STORY",
            ItemType::Test => "TEST",
            ItemType::Scenario => "SCENARIO",
            ItemType::Step => "STEP",
            ItemType::BeforeClass => "BEFORE_CLASS",
            ItemType::BeforeGroups => "BEFORE_GROUPS",
            ItemType::BeforeMethod => "BEFORE_METHOD",
            ItemType::BeforeSuite => "BEFORE_SUITE",
            ItemType::BeforeTest => "BEFORE_TEST",
            ItemType::AfterClass => "AFTER_CLASS",
            ItemType::AfterGroups => "AFTER_GROUPS",
            ItemType::AfterMethod => "AFTER_METHOD",
            ItemType::AfterSuite => "AFTER_SUITE",
            ItemType::AfterTest => "AFTER_TEST",
        }
    }

    /// Fixture phases run around tests rather than being tests themselves
    pub fn is_fixture(&self) -> bool {
        matches!(
            self,
            ItemType::BeforeClass
                | ItemType::BeforeGroups
                | ItemType::BeforeMethod
                | ItemType::BeforeSuite
                | ItemType::BeforeTest
                | ItemType::AfterClass
                | ItemType::AfterGroups
                | ItemType::AfterMethod
                | ItemType::AfterSuite
                | ItemType::AfterTest
        )
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SharedError::InvalidValue {
                kind: "item type",
                input: s.to_string(),
            })
    }
}

/// Terminal status reported when finishing an item or a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Passed,
    Failed,
    Stopped,
    Skipped,
    Reseted,
    Cancelled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Passed => "PASSED",
            ItemStatus::Failed => "FAILED",
            ItemStatus::Stopped => "STOPPED",
            ItemStatus::Skipped => "SKIPPED",
            ItemStatus::Reseted => "RESETED",
            ItemStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASSED" => Ok(ItemStatus::Passed),
            "FAILED" => Ok(ItemStatus::Failed),
            "STOPPED" => Ok(ItemStatus::Stopped),
            "SKIPPED" => Ok(ItemStatus::Skipped),
            "RESETED" => Ok(ItemStatus::Reseted),
            "CANCELLED" => Ok(ItemStatus::Cancelled),
            _ => Err(SharedError::InvalidValue {
                kind: "status",
                input: s.to_string(),
            }),
        }
    }
}

/// Severity attached to a log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Trace,
    Info,
    Debug,
    Fatal,
    Unknown,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Trace => "trace",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Fatal => "fatal",
            LogLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "trace" => Ok(LogLevel::Trace),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "fatal" => Ok(LogLevel::Fatal),
            "unknown" => Ok(LogLevel::Unknown),
            _ => Err(SharedError::InvalidValue {
                kind: "log level",
                input: s.to_string(),
            }),
        }
    }
}

/// Launch visibility mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchMode {
    #[default]
    Default,
    Debug,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchMode::Default => "DEFAULT",
            LaunchMode::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchMode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(LaunchMode::Default),
            "DEBUG" => Ok(LaunchMode::Debug),
            _ => Err(SharedError::InvalidValue {
                kind: "launch mode",
                input: s.to_string(),
            }),
        }
    }
}

/// Key-value pair for test parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
