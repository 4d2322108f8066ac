//! In-memory implementation of the remote todo collection.
//!
//! Serves the wire contract the client core targets: `GET /` lists the
//! collection as `{todos}`, `POST /` creates and returns `{todo}`, and
//! `PUT`/`DELETE /{id}` address one record. Failures carry a `{message}`
//! body. Records live in an ordered `Vec` so `list` returns creation order.
//!
//! DTOs are defined independently from the client crate on purpose;
//! integration tests catch schema drift between the two.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

/// Full-replacement payload: the record is overwritten wholesale.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub todos: Vec<TodoRecord>,
}

#[derive(Serialize)]
pub struct TodoResponse {
    pub todo: TodoRecord,
}

/// `{message}` body, carried by every failure and by delete success.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub type Db = Arc<RwLock<Vec<TodoRecord>>>;

type ApiFailure = (StatusCode, Json<MessageResponse>);

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", axum::routing::put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<ListResponse> {
    let todos = db.read().await;
    Json(ListResponse {
        todos: todos.clone(),
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiFailure> {
    if input.title.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Title is required."));
    }
    let todo = TodoRecord {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        priority: input.priority,
        completed: false,
        created_at: Utc::now(),
    };
    db.write().await.push(todo.clone());
    tracing::debug!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<TodoResponse>, ApiFailure> {
    if input.title.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Title is required."));
    }
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Todo not found."))?;
    todo.title = input.title;
    todo.description = input.description;
    todo.priority = input.priority;
    todo.completed = input.completed;
    tracing::debug!(%id, "todo updated");
    Ok(Json(TodoResponse { todo: todo.clone() }))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(failure(StatusCode::NOT_FOUND, "Todo not found."));
    }
    tracing::debug!(%id, "todo deleted");
    Ok(Json(MessageResponse {
        message: "Todo deleted.".to_string(),
    }))
}
