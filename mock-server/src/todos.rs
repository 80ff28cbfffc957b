use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{require_title, AppError};
use crate::AppState;

/// A todo as stored by the backend. Priority and deadline are kept exactly as
/// the client sent them; interpreting them is the client's job.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub completed: Option<bool>,
}

pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let todos = state.todos.read().await;
    Json(todos.clone())
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    require_title(&input.title)?;
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        priority: input.priority,
        deadline: input.deadline,
        completed: false,
        created_at: Utc::now(),
    };
    state.todos.write().await.push(todo.clone());
    tracing::info!(todo_id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let todos = state.todos.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| missing(id))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, AppError> {
    if let Some(title) = &input.title {
        require_title(title)?;
    }
    let mut todos = state.todos.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(|| missing(id))?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(priority) = input.priority {
        todo.priority = Some(priority);
    }
    if let Some(deadline) = input.deadline {
        todo.deadline = Some(deadline);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    tracing::info!(todo_id = %id, "todo updated");
    Ok(Json(todo.clone()))
}

pub(crate) async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, AppError> {
    let mut todos = state.todos.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(|| missing(id))?;
    todo.completed = !todo.completed;
    tracing::info!(todo_id = %id, completed = todo.completed, "todo toggled");
    Ok(Json(todo.clone()))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut todos = state.todos.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(missing(id));
    }
    tracing::info!(todo_id = %id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn missing(id: Uuid) -> AppError {
    tracing::debug!(todo_id = %id, "todo not found");
    AppError::NotFound("todo")
}
