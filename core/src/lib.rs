//! Synchronous API client core for the notes and todos service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and orders todo snapshots
//! for display.
//!
//! # Design
//! - `NotesClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ordering` is a pure function over a borrowed snapshot; it never fails
//!   and never mutates the records it is given.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod deadline;
pub mod error;
pub mod http;
pub mod id;
pub mod ordering;
pub mod priority;
pub mod types;

pub use client::NotesClient;
pub use deadline::parse_deadline;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use id::RecordId;
pub use ordering::{order, partition, TodoViews};
pub use priority::Priority;
pub use types::{
    CreateNote, CreateTodo, Note, NoteSummary, SpeechAudio, Todo, UpdateNote, UpdateTodo,
};
