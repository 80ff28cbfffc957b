//! Todo priority as sent by the backend.
//!
//! The backend stores priority as free text, so anything outside the four
//! known labels survives as `Unrecognized` instead of failing the whole list.
//! Labels are matched exactly (`"urgent"` is not `Urgent`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weight given to todos without a recognized priority.
pub const DEFAULT_WEIGHT: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    /// Any label the backend returned that is not one of the four above.
    Unrecognized(String),
}

impl Priority {
    /// Infallible: unknown labels become `Unrecognized`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Urgent" => Priority::Urgent,
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            other => {
                tracing::debug!(label = other, "unrecognized todo priority");
                Priority::Unrecognized(other.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Unrecognized(raw) => raw,
        }
    }

    /// Sort weight, higher first. `Unrecognized` ranks like `Medium`.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
            Priority::Unrecognized(_) => DEFAULT_WEIGHT,
        }
    }
}

/// Weight of an optional priority; a missing priority ranks like `Medium`.
pub fn weight_of(priority: Option<&Priority>) -> u8 {
    priority.map_or(DEFAULT_WEIGHT, Priority::weight)
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Priority {
    fn from(raw: &str) -> Self {
        Priority::parse(raw)
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Priority::parse(&raw))
    }
}

/// Serde adapter for `Option<Priority>` fields on records coming from the
/// backend. Accepts any JSON value: strings are parsed, `null` and a missing
/// field become `None`, and any other value is kept as `Unrecognized`.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Priority;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(Priority::parse(&raw)),
            Some(other) => {
                tracing::debug!(value = %other, "non-string todo priority");
                Some(Priority::Unrecognized(other.to_string()))
            }
        })
    }
}
