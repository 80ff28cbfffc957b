use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{require_title, AppError};
use crate::AppState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<Note>> {
    Json(state.notes.read().await.clone())
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    require_title(&input.title)?;
    let note = Note {
        id: Uuid::new_v4(),
        title: input.title,
        content: input.content,
        summary: None,
        category: input.category,
        created_at: Utc::now(),
    };
    state.notes.write().await.push(note.clone());
    tracing::info!(note_id = %note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateNote>,
) -> Result<Json<Note>, AppError> {
    require_title(&input.title)?;
    let mut notes = state.notes.write().await;
    let note = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| missing(id))?;
    note.title = input.title;
    note.content = input.content;
    if let Some(category) = input.category {
        note.category = Some(category);
    }
    tracing::info!(note_id = %id, "note updated");
    Ok(Json(note.clone()))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut notes = state.notes.write().await;
    let before = notes.len();
    notes.retain(|n| n.id != id);
    if notes.len() == before {
        return Err(missing(id));
    }
    tracing::info!(note_id = %id, "note deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Summarize the note's content and store the result on the note.
pub(crate) async fn summarize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SummaryResponse>, AppError> {
    let mut notes = state.notes.write().await;
    let note = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| missing(id))?;
    let summary = state.summarizer.summarize(&note.content)?;
    note.summary = Some(summary.clone());
    tracing::info!(note_id = %id, "note summarized");
    Ok(Json(SummaryResponse { summary }))
}

/// Read the note's title and content aloud.
pub(crate) async fn speak(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let text = {
        let notes = state.notes.read().await;
        let note = notes.iter().find(|n| n.id == id).ok_or_else(|| missing(id))?;
        format!("{}. {}", note.title, note.content)
    };
    let audio = state.speech.synthesize(&text)?;
    tracing::info!(note_id = %id, bytes = audio.len(), "note synthesized");
    let headers = [
        (header::CONTENT_TYPE, state.speech.content_type()),
        (header::CACHE_CONTROL, "no-cache"),
        (header::CONTENT_DISPOSITION, "inline; filename=note_audio.wav"),
    ];
    Ok((headers, audio))
}

fn missing(id: Uuid) -> AppError {
    tracing::debug!(note_id = %id, "note not found");
    AppError::NotFound("note")
}
