use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Json};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

pub use axum::{http::StatusCode, Router};

/// A todo record in the shape the public collection serves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, user_id: i64, title: &str, completed: bool) -> Self {
        Self {
            user_id,
            id,
            title: title.to_string(),
            completed,
        }
    }
}

pub type Db = Arc<Vec<Todo>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    failure: Option<StatusCode>,
}

/// The records `app()` serves.
pub fn default_todos() -> Vec<Todo> {
    vec![
        Todo::new(1, 1, "delectus aut autem", false),
        Todo::new(2, 1, "quis ut nam facilis et officia qui", false),
        Todo::new(3, 1, "fugiat veniam minus", false),
        Todo::new(4, 1, "et porro tempora", true),
    ]
}

pub fn app() -> Router {
    app_with(default_todos())
}

/// Serve exactly `todos` from `GET /todos`.
pub fn app_with(todos: Vec<Todo>) -> Router {
    router(AppState {
        db: Arc::new(todos),
        failure: None,
    })
}

/// Answer every `GET /todos` with `status` and a plain-text body.
pub fn failing_app(status: StatusCode) -> Router {
    router(AppState {
        db: Arc::new(Vec::new()),
        failure: Some(status),
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_todos(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(status) = state.failure {
        debug!(%status, "answering todo list with configured failure");
        return (status, "mock failure").into_response();
    }
    debug!(count = state.db.len(), "serving todo list");
    Json(state.db.as_ref().clone()).into_response()
}
