//! Client core for a todo list UI backed by a remote HTTP collection.
//!
//! # Overview
//! The remote collection is the source of truth; this crate owns the
//! client-side mirror of it plus the ephemeral form state, and synchronizes
//! every user action through one request/response cycle. The core never
//! touches the network (host-does-IO pattern): `TodoListClient::begin_*`
//! methods validate and hand back an `HttpRequest`, the caller executes it,
//! and `finish` reconciles local state with the outcome, making the whole
//! crate deterministic and testable.
//!
//! # Design
//! - `AppState` is an explicit state container mutated only through named
//!   transitions; it is independent of any UI binding.
//! - `TodoApi` is stateless — it holds only `base_url` and splits each CRUD
//!   verb into `build_*` / `parse_*`.
//! - At most one operation is in flight; `begin_*` refuses while one is
//!   pending, which is the sole concurrency-control mechanism.
//! - Every failure is recovered at the operation boundary into a shared,
//!   dismissible error message; there is no crash path and no retry.

pub mod api;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use api::TodoApi;
pub use controller::{Confirmation, TodoListClient, API_URL_ENV, EMPTY_TITLE_MESSAGE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use state::{AppState, Draft, EditDraft, ListView};
pub use types::{CreateTodo, ErrorResponse, ListResponse, Priority, TodoRecord, TodoResponse, UpdateTodo};
