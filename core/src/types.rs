//! Domain DTOs for the notes API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift between the
//! two. Records coming back from the backend are parsed leniently: priority
//! and deadline never fail a whole list, they degrade to "unrecognized" and
//! "absent" respectively.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::priority::{self, Priority};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "priority::lenient::deserialize")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        serialize_with = "crate::deadline::lenient::serialize",
        deserialize_with = "crate::deadline::lenient::deserialize"
    )]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn priority_weight(&self) -> u8 {
        priority::weight_of(self.priority.as_ref())
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::deadline::lenient::serialize",
        deserialize_with = "crate::deadline::lenient::deserialize"
    )]
    pub deadline: Option<NaiveDateTime>,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::deadline::lenient::serialize",
        deserialize_with = "crate::deadline::lenient::deserialize"
    )]
    pub deadline: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A note returned by the API. `summary` is filled in by the summarize
/// endpoint and is `None` until then.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Request payload for replacing a note's text. A missing `category` keeps
/// the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNote {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Response of the summarize endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteSummary {
    pub summary: String,
}

/// Audio returned by the speak endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
