//! Domain DTOs and response envelopes for the todo collection endpoint.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Wire
//! field names are camelCase (`createdAt`), matching the remote collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Importance of a todo. Serialized lowercase (`low` / `medium` / `high`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single todo item as stored server-side and mirrored client-side.
///
/// `id` and `created_at` are server-assigned; the client never fabricates
/// either — a record only enters the local list after the server confirmed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
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

/// Request payload for creating a new todo. The server assigns `id`,
/// `createdAt`, and `completed: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

/// Full-replacement payload for updating an existing todo. Every field is
/// sent on every update, including fields unrelated to the edit; the server
/// overwrites the record wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Success envelope for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub todos: Vec<TodoRecord>,
}

/// Success envelope for `POST /` and `PUT /:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo: TodoRecord,
}

/// Failure body. Any non-2xx response may carry one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
