//! Notification data types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};

/// Identifier of a toast, unique for the lifetime of its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Toast severity.
///
/// Only the exact lowercase names map to the known variants; any other
/// (trimmed) name is kept verbatim in `Other`, so text round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Other(String),
}

impl Category {
    /// Lowercase name used in logs and JSON.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Info => "info",
            Category::Success => "success",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Other(name) => name,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let category = match name {
            "info" => Category::Info,
            "success" => Category::Success,
            "warning" => Category::Warning,
            "error" => Category::Error,
            _ => Category::Other(name.to_string()),
        };
        Ok(category)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub category: Category,
    #[serde(rename = "lifetime_ms", serialize_with = "serialize_millis")]
    pub lifetime: Duration,
    pub created_at: DateTime<Local>,
}

fn serialize_millis<S: Serializer>(lifetime: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(lifetime.as_millis()).unwrap_or(u64::MAX))
}
