//! Stateless HTTP request builder and response parser for the notes API.
//!
//! # Design
//! `NotesClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::id::RecordId;
use crate::ordering::TodoViews;
use crate::types::{
    CreateNote, CreateTodo, Note, NoteSummary, SpeechAudio, Todo, UpdateNote, UpdateTodo,
};

/// Synchronous, stateless client for the notes and todos API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct NotesClient {
    base_url: String,
}

impl NotesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            ..self.request(method, path)
        })
    }

    // -- notes ---------------------------------------------------------------

    pub fn build_list_notes(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/notes")
    }

    pub fn build_create_note(&self, input: &CreateNote) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/notes", input)
    }

    pub fn build_update_note(&self, id: &RecordId, input: &UpdateNote) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/notes/{id}"), input)
    }

    pub fn build_delete_note(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/notes/{id}"))
    }

    pub fn build_summarize_note(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Post, &format!("/summarize/{id}"))
    }

    pub fn build_speak_note(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Post, &format!("/speak/{id}"))
    }

    pub fn parse_list_notes(&self, response: HttpResponse) -> Result<Vec<Note>, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_update_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_delete_note(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_summarize_note(&self, response: HttpResponse) -> Result<NoteSummary, ApiError> {
        parse_json(&response, 200)
    }

    /// The body is returned untouched; only the content type is checked.
    pub fn parse_speak_note(&self, response: HttpResponse) -> Result<SpeechAudio, ApiError> {
        check_status(&response, 200)?;
        let content_type = response.header("content-type").unwrap_or_default().to_string();
        if !content_type.starts_with("audio/") {
            return Err(ApiError::UnexpectedContentType(content_type));
        }
        Ok(SpeechAudio {
            content_type,
            bytes: response.body,
        })
    }

    // -- todos ---------------------------------------------------------------

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos")
    }

    pub fn build_get_todo(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", input)
    }

    pub fn build_update_todo(&self, id: &RecordId, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/todos/{id}"), input)
    }

    pub fn build_delete_todo(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todos/{id}"))
    }

    pub fn build_toggle_todo(&self, id: &RecordId) -> HttpRequest {
        self.request(HttpMethod::Patch, &format!("/todos/{id}/toggle"))
    }

    /// Todos in the order the backend returned them.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(&response, 200)
    }

    /// Parse a list response straight into ordered active/completed views.
    pub fn parse_todo_views(&self, response: HttpResponse) -> Result<TodoViews, ApiError> {
        let todos = self.parse_list_todos(response)?;
        Ok(TodoViews::from_snapshot(&todos))
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(&response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(&response, 200)
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Priority;

    fn client() -> NotesClient {
        NotesClient::new("http://localhost:3000")
    }

    fn nil() -> RecordId {
        RecordId::from("00000000-0000-0000-0000-000000000000")
    }

    const NOTE_JSON: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","title":"Groceries","content":"milk, eggs","summary":null,"category":"home"}"#;

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(&nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/todos/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_serializes_priority_and_deadline() {
        let input = CreateTodo {
            title: "File taxes".to_string(),
            description: Some("before April".to_string()),
            priority: Some(Priority::Urgent),
            deadline: crate::deadline::parse_deadline("2030-04-15T09:00"),
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "File taxes");
        assert_eq!(body["priority"], "Urgent");
        assert_eq!(body["deadline"], "2030-04-15T09:00:00");
    }

    #[test]
    fn build_update_todo_skips_unset_fields() {
        let input = UpdateTodo {
            title: Some("Updated".to_string()),
            ..UpdateTodo::default()
        };
        let req = client().build_update_todo(&nil(), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Updated" }));
    }

    #[test]
    fn build_toggle_todo_uses_patch() {
        let req = client().build_toggle_todo(&nil());
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(
            req.path,
            "http://localhost:3000/todos/00000000-0000-0000-0000-000000000000/toggle"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_note_actions_hit_action_routes() {
        let id = RecordId::Int(7);
        assert_eq!(
            client().build_summarize_note(&id).path,
            "http://localhost:3000/summarize/7"
        );
        let speak = client().build_speak_note(&id);
        assert_eq!(speak.method, HttpMethod::Post);
        assert_eq!(speak.path, "http://localhost:3000/speak/7");
    }

    #[test]
    fn build_create_note_omits_missing_category() {
        let input = CreateNote {
            title: "Idea".to_string(),
            content: "write it down".to_string(),
            category: None,
        };
        let req = client().build_create_note(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body.get("category").is_none());
    }

    #[test]
    fn parse_list_todos_keeps_backend_order() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":"00000000-0000-0000-0000-000000000001","title":"Low","priority":"Low","completed":false},
                {"id":"00000000-0000-0000-0000-000000000002","title":"Urgent","priority":"Urgent","completed":false}]"#,
        );
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos[0].title, "Low");
        assert_eq!(todos[1].title, "Urgent");
    }

    #[test]
    fn parse_todo_views_orders_and_splits() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":"00000000-0000-0000-0000-000000000001","title":"a","priority":"Low","completed":false},
                {"id":"00000000-0000-0000-0000-000000000002","title":"b","priority":"Urgent","completed":true},
                {"id":"00000000-0000-0000-0000-000000000003","title":"c","priority":"High","completed":false}]"#,
        );
        let views = client().parse_todo_views(response).unwrap();
        let active: Vec<&str> = views.active.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(active, vec!["c", "a"]);
        assert_eq!(views.completed[0].title, "b");
    }

    #[test]
    fn parse_todo_views_accepts_integer_ids() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"title":"one","priority":"Low","deadline":null,"completed":false},
                {"id":2,"title":"two","priority":"Urgent","deadline":"2099-01-01T00:00","completed":false},
                {"id":3,"title":"three","priority":"Urgent","deadline":"2050-01-01T00:00","completed":false}]"#,
        );
        let views = client().parse_todo_views(response).unwrap();
        let ids: Vec<RecordId> = views.active.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::Int(3), RecordId::Int(2), RecordId::Int(1)]);
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_toggle_todo_success() {
        let response = HttpResponse::new(
            200,
            r#"{"id":"00000000-0000-0000-0000-000000000001","title":"Flip","completed":true}"#,
        );
        let todo = client().parse_toggle_todo(response).unwrap();
        assert!(todo.completed);
    }

    #[test]
    fn parse_delete_todo_success() {
        assert!(client().parse_delete_todo(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_note_not_found() {
        let err = client().parse_delete_note(HttpResponse::new(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_note_success() {
        let note = client().parse_create_note(HttpResponse::new(201, NOTE_JSON)).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.category.as_deref(), Some("home"));
        assert!(note.summary.is_none());
    }

    #[test]
    fn parse_summarize_note_success() {
        let summary = client()
            .parse_summarize_note(HttpResponse::new(200, r#"{"summary":"milk and eggs"}"#))
            .unwrap();
        assert_eq!(summary.summary, "milk and eggs");
    }

    #[test]
    fn parse_speak_note_returns_audio_bytes() {
        let response = HttpResponse::new(200, vec![b'R', b'I', b'F', b'F'])
            .with_header("Content-Type", "audio/wav");
        let audio = client().parse_speak_note(response).unwrap();
        assert_eq!(audio.content_type, "audio/wav");
        assert_eq!(audio.bytes, b"RIFF");
    }

    #[test]
    fn parse_speak_note_rejects_json() {
        let response = HttpResponse::new(200, "{}").with_header("content-type", "application/json");
        let err = client().parse_speak_note(response).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedContentType(ref ct) if ct == "application/json"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = NotesClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_notes().path, "http://localhost:3000/notes");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
