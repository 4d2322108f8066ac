//! Stateless HTTP request builder and response parser for the todo
//! collection endpoint.
//!
//! # Design
//! `TodoApi` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD verb is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual round trip, keeping this layer
//! deterministic and free of I/O dependencies.
//!
//! The collection lives at the base URL itself: `GET /` lists, `POST /`
//! creates, and `PUT`/`DELETE /:id` address one record. Success bodies are
//! enveloped (`{todos}` / `{todo}`); failure bodies may carry `{message}`.

use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ErrorResponse, ListResponse, TodoRecord, TodoResponse, UpdateTodo};

/// Stateless client for the remote todo collection.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.base_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoRecord>, ApiError> {
        check_status(&response)?;
        let body: ListResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(body.todos)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoRecord, ApiError> {
        check_status(&response)?;
        let body: TodoResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(body.todo)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<TodoRecord, ApiError> {
        check_status(&response)?;
        let body: TodoResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(body.todo)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        // Delete success requires no body; anything the server sent is ignored.
        check_status(&response)?;
        Ok(())
    }
}

/// Map any non-2xx status to `ApiError::Api`, extracting the server's
/// `{message}` body when it parses as one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorResponse>(&response.body)
        .ok()
        .map(|body| body.message);
    Err(ApiError::Api {
        status: response.status,
        message,
    })
}
