//! In-memory stand-in for the notes and todos backend.
//!
//! Serves the same routes as the real service so the client core can be
//! exercised over real HTTP. Records live in insertion-ordered vectors behind
//! a `RwLock`; nothing is persisted.

pub mod config;
pub mod error;
pub mod notes;
pub mod shutdown;
pub mod speech;
pub mod summarize;
pub mod todos;

use std::{future::Future, sync::Arc};

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use notes::Note;
pub use speech::{SilenceSynthesizer, SpeechSynthesizer};
pub use summarize::{LeadingWordsSummarizer, Summarizer};
pub use todos::Todo;

pub type Table<T> = Arc<RwLock<Vec<T>>>;

#[derive(Clone)]
pub struct AppState {
    pub notes: Table<Note>,
    pub todos: Table<Todo>,
    pub summarizer: Arc<dyn Summarizer>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            notes: Arc::default(),
            todos: Arc::default(),
            summarizer: Arc::new(LeadingWordsSummarizer::new(config.summary_max_words)),
            speech: Arc::new(SilenceSynthesizer),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route("/notes/{id}", put(notes::update).delete(notes::delete))
        .route("/summarize/{id}", post(notes::summarize))
        .route("/speak/{id}", post(notes::speak))
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/{id}",
            get(todos::get).put(todos::update).delete(todos::delete),
        )
        .route("/todos/{id}/toggle", patch(todos::toggle))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `state` until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
