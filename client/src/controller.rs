//! Stateful UI controller mediating between `AppState` and the remote
//! collection.
//!
//! # Design
//! `TodoListClient` owns the state container, the stateless `TodoApi`, and
//! an `InFlight` marker for the single operation that may be outstanding.
//! Each user action maps to a `begin_*` method that validates locally,
//! applies the `operation_started` transition, and returns the
//! `HttpRequest` to execute — or `None` when no round trip should be issued
//! (validation failure, declined confirmation, unknown id, or an operation
//! already in flight). The host runs the I/O and reports back through
//! `finish`, which applies exactly one terminal transition.
//!
//! Overlap is prevented by construction: while an operation is in flight,
//! every `begin_*` refuses, mirroring a UI that disables its controls while
//! `loading` is set. Nothing here is cancellable and nothing retries.

use uuid::Uuid;

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::state::{AppState, Draft, EditDraft, ListView};
use crate::types::{TodoRecord, UpdateTodo};

/// Local validation message for an empty or whitespace-only title.
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a todo title.";

/// Environment variable naming the collection's base URL.
pub const API_URL_ENV: &str = "TODO_API_URL";

/// Outcome of the user-consent gate guarding destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// The one operation that may be awaiting its round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    List,
    Create,
    Update(Uuid),
    Remove(Uuid),
    Toggle(Uuid),
}

impl InFlight {
    /// User-facing message when the server supplied no `{message}` of its
    /// own, or when the failure never produced a response at all.
    fn fallback_message(self) -> &'static str {
        match self {
            InFlight::List => "Failed to load todos.",
            InFlight::Create => "Failed to add todo.",
            InFlight::Update(_) => "Failed to update todo.",
            InFlight::Remove(_) => "Failed to delete todo.",
            InFlight::Toggle(_) => "Failed to change completion status.",
        }
    }
}

/// Stateful controller for the todo list.
///
/// Owns the in-memory mirror of the remote collection and drives every
/// read/write against it through the begin/finish cycle.
#[derive(Debug)]
pub struct TodoListClient {
    api: TodoApi,
    state: AppState,
    in_flight: Option<InFlight>,
}

impl TodoListClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            api: TodoApi::new(base_url),
            state: AppState::new(),
            in_flight: None,
        }
    }

    /// Build a client from the `TODO_API_URL` environment variable, the
    /// sole configuration surface. `None` when the variable is unset.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_URL_ENV).ok().map(|url| Self::new(&url))
    }

    // --- state reads ---

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn todos(&self) -> &[TodoRecord] {
        self.state.todos()
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn list_view(&self) -> ListView<'_> {
        self.state.list_view()
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    // --- drafts ---

    pub fn draft(&self) -> &Draft {
        self.state.draft()
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        self.state.draft_mut()
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.state.editing_id()
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.state.edit_draft()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.state.edit_draft_mut()
    }

    /// Enter edit mode for the record with `id`, seeding the edit buffer
    /// from its current fields. Refused while an operation is in flight or
    /// when no such record exists.
    pub fn start_edit(&mut self, id: Uuid) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.state.start_edit(id)
    }

    /// Leave edit mode, discarding the buffer.
    pub fn cancel_edit(&mut self) {
        self.state.exit_edit();
    }

    // --- operations ---

    /// Fetch all records. On success the whole local list is replaced with
    /// the server's ordering.
    pub fn begin_list(&mut self) -> Option<HttpRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        tracing::debug!("loading todo list");
        self.state.operation_started();
        self.in_flight = Some(InFlight::List);
        Some(self.api.build_list())
    }

    /// Create a todo from the draft buffer. An empty title fails fast with
    /// a local validation message and issues no network call.
    pub fn begin_create(&mut self) -> Option<HttpRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let payload = self.state.draft().to_create();
        if payload.title.trim().is_empty() {
            self.state.validation_failed(EMPTY_TITLE_MESSAGE);
            return None;
        }
        match self.api.build_create(&payload) {
            Ok(req) => {
                tracing::debug!(title = %payload.title, "creating todo");
                self.state.operation_started();
                self.in_flight = Some(InFlight::Create);
                Some(req)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to build create request");
                self.state.operation_failed(InFlight::Create.fallback_message().to_string());
                None
            }
        }
    }

    /// Save the edit buffer as a full-replacement update of the record
    /// under edit. Same title precondition as `begin_create`; requires
    /// edit mode to be active.
    pub fn begin_update(&mut self) -> Option<HttpRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let id = self.state.editing_id()?;
        let payload = self.state.edit_draft()?.to_update();
        if payload.title.trim().is_empty() {
            self.state.validation_failed(EMPTY_TITLE_MESSAGE);
            return None;
        }
        match self.api.build_update(id, &payload) {
            Ok(req) => {
                tracing::debug!(%id, "updating todo");
                self.state.operation_started();
                self.in_flight = Some(InFlight::Update(id));
                Some(req)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to build update request");
                self.state.operation_failed(InFlight::Update(id).fallback_message().to_string());
                None
            }
        }
    }

    /// Delete the record with `id`. The destructive-action gate: the caller
    /// must have obtained the user's consent and passes the verdict in;
    /// `Declined` changes nothing and issues nothing.
    pub fn begin_remove(&mut self, id: Uuid, confirmation: Confirmation) -> Option<HttpRequest> {
        if self.in_flight.is_some() || confirmation == Confirmation::Declined {
            return None;
        }
        tracing::debug!(%id, "deleting todo");
        self.state.operation_started();
        self.in_flight = Some(InFlight::Remove(id));
        Some(self.api.build_delete(id))
    }

    /// Invert `completed` on the record with `id`, sending the full record
    /// back through the update path. Neither requires nor enters edit mode.
    pub fn begin_toggle(&mut self, id: Uuid) -> Option<HttpRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let record = self.state.todos().iter().find(|t| t.id == id)?;
        let payload = UpdateTodo {
            title: record.title.clone(),
            description: record.description.clone(),
            priority: record.priority,
            completed: !record.completed,
        };
        match self.api.build_update(id, &payload) {
            Ok(req) => {
                tracing::debug!(%id, completed = payload.completed, "toggling todo");
                self.state.operation_started();
                self.in_flight = Some(InFlight::Toggle(id));
                Some(req)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to build toggle request");
                self.state.operation_failed(InFlight::Toggle(id).fallback_message().to_string());
                None
            }
        }
    }

    /// Complete the in-flight operation with the host's round-trip outcome.
    ///
    /// Applies exactly one terminal transition. Every failure — transport,
    /// non-2xx, unparseable body — is fully recovered here: the message
    /// lands in the shared error slot, `loading` resets, and the list and
    /// draft buffers are left untouched. A call with nothing in flight is
    /// a no-op.
    pub fn finish(&mut self, outcome: Result<HttpResponse, TransportError>) {
        let Some(op) = self.in_flight.take() else {
            return;
        };
        let response = match outcome {
            Ok(response) => response,
            Err(TransportError(detail)) => {
                tracing::warn!(%detail, "transport failure");
                self.state.operation_failed(op.fallback_message().to_string());
                return;
            }
        };
        match op {
            InFlight::List => match self.api.parse_list(response) {
                Ok(todos) => self.state.list_loaded(todos),
                Err(err) => self.fail(op, err),
            },
            InFlight::Create => match self.api.parse_create(response) {
                Ok(todo) => self.state.record_created(todo),
                Err(err) => self.fail(op, err),
            },
            InFlight::Update(_) => match self.api.parse_update(response) {
                Ok(todo) => {
                    self.state.record_replaced(todo);
                    self.state.exit_edit();
                }
                Err(err) => self.fail(op, err),
            },
            InFlight::Toggle(_) => match self.api.parse_update(response) {
                Ok(todo) => self.state.record_replaced(todo),
                Err(err) => self.fail(op, err),
            },
            InFlight::Remove(id) => match self.api.parse_delete(response) {
                Ok(()) => self.state.record_removed(id),
                Err(err) => self.fail(op, err),
            },
        }
    }

    fn fail(&mut self, op: InFlight, err: ApiError) {
        tracing::warn!(error = %err, "todo operation failed");
        let message = match err {
            ApiError::Api { message: Some(msg), .. } => msg,
            _ => op.fallback_message().to_string(),
        };
        self.state.operation_failed(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListResponse, Priority, TodoResponse};
    use chrono::Utc;

    fn record(title: &str) -> TodoRecord {
        TodoRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            completed: false,
            created_at: Utc::now(),
        }
    }

    fn ok(status: u16, body: String) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }

    fn list_body(todos: Vec<TodoRecord>) -> String {
        serde_json::to_string(&ListResponse { todos }).unwrap()
    }

    fn todo_body(todo: TodoRecord) -> String {
        serde_json::to_string(&TodoResponse { todo }).unwrap()
    }

    fn client() -> TodoListClient {
        TodoListClient::new("http://localhost:3000")
    }

    /// Load `todos` into the client through the normal list round trip.
    fn loaded(todos: Vec<TodoRecord>) -> TodoListClient {
        let mut c = client();
        let req = c.begin_list().expect("list should issue a request");
        assert_eq!(req.path, "http://localhost:3000");
        c.finish(ok(200, list_body(todos)));
        c
    }

    // --- list ---

    #[test]
    fn list_success_replaces_local_list() {
        let c = loaded(vec![record("A"), record("B")]);
        assert_eq!(c.todos().len(), 2);
        assert!(!c.loading());
        assert!(c.error().is_none());
    }

    #[test]
    fn list_failure_leaves_list_unchanged() {
        let mut c = loaded(vec![record("cached")]);
        c.begin_list().unwrap();
        c.finish(ok(500, String::new()));
        assert_eq!(c.todos().len(), 1);
        assert_eq!(c.error(), Some("Failed to load todos."));
        assert!(!c.loading());
    }

    // --- create ---

    #[test]
    fn create_empty_title_issues_no_request() {
        let mut c = client();
        c.draft_mut().title = "   ".to_string();
        assert!(c.begin_create().is_none());
        assert_eq!(c.error(), Some(EMPTY_TITLE_MESSAGE));
        assert!(!c.loading(), "validation must not set loading");
        assert!(c.todos().is_empty());
    }

    #[test]
    fn create_success_appends_server_record_and_clears_draft() {
        let mut c = loaded(vec![record("existing")]);
        c.draft_mut().title = "Buy milk".to_string();
        c.draft_mut().priority = Priority::High;

        let req = c.begin_create().unwrap();
        assert!(c.loading());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");

        let mut confirmed = record("Buy milk");
        confirmed.priority = Priority::High;
        let id = confirmed.id;
        c.finish(ok(201, todo_body(confirmed)));

        assert_eq!(c.todos().len(), 2);
        assert_eq!(c.todos()[1].id, id);
        assert_eq!(c.draft().title, "");
        assert!(!c.loading());
    }

    #[test]
    fn create_failure_retains_draft_and_list() {
        let mut c = loaded(vec![record("existing")]);
        c.draft_mut().title = "unsaved input".to_string();
        c.begin_create().unwrap();
        c.finish(ok(500, String::new()));

        assert_eq!(c.todos().len(), 1);
        assert_eq!(c.draft().title, "unsaved input");
        assert_eq!(c.error(), Some("Failed to add todo."));
    }

    #[test]
    fn create_failure_surfaces_server_message() {
        let mut c = client();
        c.draft_mut().title = "dup".to_string();
        c.begin_create().unwrap();
        c.finish(ok(409, r#"{"message":"already exists"}"#.to_string()));
        assert_eq!(c.error(), Some("already exists"));
    }

    // --- update ---

    #[test]
    fn update_requires_edit_mode() {
        let mut c = loaded(vec![record("A")]);
        assert!(c.begin_update().is_none());
    }

    #[test]
    fn update_success_replaces_record_and_exits_edit() {
        let a = record("A");
        let b = record("B");
        let b_id = b.id;
        let mut c = loaded(vec![a.clone(), b]);

        assert!(c.start_edit(b_id));
        c.edit_draft_mut().unwrap().title = "B renamed".to_string();
        c.begin_update().unwrap();

        let mut confirmed = record("B renamed");
        confirmed.id = b_id;
        c.finish(ok(200, todo_body(confirmed.clone())));

        assert_eq!(c.todos()[0], a, "untouched record is unchanged by value");
        assert_eq!(c.todos()[1], confirmed);
        assert!(c.editing_id().is_none(), "edit mode exits on save");
    }

    #[test]
    fn update_failure_keeps_edit_mode_active() {
        let rec = record("A");
        let id = rec.id;
        let mut c = loaded(vec![rec]);
        c.start_edit(id);
        c.edit_draft_mut().unwrap().title = "A renamed".to_string();
        c.begin_update().unwrap();
        c.finish(ok(500, String::new()));

        assert_eq!(c.editing_id(), Some(id));
        assert_eq!(c.edit_draft().unwrap().title, "A renamed");
        assert_eq!(c.todos()[0].title, "A", "no local mutation on failure");
        assert_eq!(c.error(), Some("Failed to update todo."));
    }

    #[test]
    fn update_empty_title_issues_no_request() {
        let rec = record("A");
        let id = rec.id;
        let mut c = loaded(vec![rec]);
        c.start_edit(id);
        c.edit_draft_mut().unwrap().title = " ".to_string();
        assert!(c.begin_update().is_none());
        assert_eq!(c.error(), Some(EMPTY_TITLE_MESSAGE));
        assert_eq!(c.editing_id(), Some(id));
        assert!(!c.loading());
    }

    #[test]
    fn update_sends_full_replacement_payload() {
        let mut rec = record("A");
        rec.description = Some("details".to_string());
        rec.completed = true;
        let id = rec.id;
        let mut c = loaded(vec![rec]);
        c.start_edit(id);

        let req = c.begin_update().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        // Fields unrelated to the edit travel too.
        assert_eq!(body["title"], "A");
        assert_eq!(body["description"], "details");
        assert_eq!(body["priority"], "medium");
        assert_eq!(body["completed"], true);
    }

    // --- remove ---

    #[test]
    fn remove_declined_confirmation_is_a_no_op() {
        let rec = record("A");
        let id = rec.id;
        let mut c = loaded(vec![rec]);
        assert!(c.begin_remove(id, Confirmation::Declined).is_none());
        assert!(!c.loading());
        assert!(c.error().is_none());
        assert_eq!(c.todos().len(), 1);
    }

    #[test]
    fn remove_success_drops_record_by_id() {
        let a = record("A");
        let b = record("B");
        let a_id = a.id;
        let mut c = loaded(vec![a, b]);

        let req = c.begin_remove(a_id, Confirmation::Confirmed).unwrap();
        assert_eq!(req.path, format!("http://localhost:3000/{a_id}"));
        c.finish(ok(200, r#"{"message":"Todo deleted."}"#.to_string()));

        assert_eq!(c.todos().len(), 1);
        assert!(c.todos().iter().all(|t| t.id != a_id));
        assert!(c.error().is_none());
    }

    #[test]
    fn remove_not_found_surfaces_server_message() {
        let rec = record("A");
        let mut c = loaded(vec![rec]);
        c.begin_remove(Uuid::new_v4(), Confirmation::Confirmed).unwrap();
        c.finish(ok(404, r#"{"message":"not found"}"#.to_string()));

        assert_eq!(c.todos().len(), 1, "list unchanged on failure");
        assert_eq!(c.error(), Some("not found"));
    }

    // --- toggle ---

    #[test]
    fn toggle_flips_only_completed() {
        let rec = record("A");
        let id = rec.id;
        let mut c = loaded(vec![rec.clone()]);

        let req = c.begin_toggle(id).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["completed"], true);
        assert_eq!(body["title"], "A");

        let mut confirmed = rec;
        confirmed.completed = true;
        c.finish(ok(200, todo_body(confirmed)));

        assert_eq!(c.todos().len(), 1);
        assert_eq!(c.todos()[0].id, id);
        assert_eq!(c.todos()[0].title, "A");
        assert!(c.todos()[0].completed);
        assert!(c.editing_id().is_none(), "toggle never enters edit mode");
    }

    #[test]
    fn toggle_unknown_id_issues_no_request() {
        let mut c = loaded(vec![record("A")]);
        assert!(c.begin_toggle(Uuid::new_v4()).is_none());
        assert!(!c.loading());
    }

    #[test]
    fn toggle_failure_uses_its_own_fallback_message() {
        let rec = record("A");
        let id = rec.id;
        let mut c = loaded(vec![rec]);
        c.begin_toggle(id).unwrap();
        c.finish(ok(500, String::new()));
        assert_eq!(c.error(), Some("Failed to change completion status."));
        assert!(!c.todos()[0].completed, "no local mutation on failure");
    }

    // --- concurrency guard and recovery ---

    #[test]
    fn begin_refuses_while_an_operation_is_in_flight() {
        let mut c = loaded(vec![record("A")]);
        let id = c.todos()[0].id;
        c.begin_list().unwrap();

        assert!(c.begin_list().is_none());
        assert!(c.begin_create().is_none());
        assert!(c.begin_toggle(id).is_none());
        assert!(c.begin_remove(id, Confirmation::Confirmed).is_none());
        assert!(!c.start_edit(id));
    }

    #[test]
    fn transport_failure_recovers_with_fallback_message() {
        let mut c = loaded(vec![record("A")]);
        c.begin_list().unwrap();
        c.finish(Err(TransportError("connection refused".to_string())));
        assert_eq!(c.error(), Some("Failed to load todos."));
        assert!(!c.loading());
        assert_eq!(c.todos().len(), 1);
    }

    #[test]
    fn unparseable_success_body_recovers_like_a_failure() {
        let mut c = client();
        c.draft_mut().title = "T".to_string();
        c.begin_create().unwrap();
        c.finish(ok(201, "garbage".to_string()));
        assert!(c.todos().is_empty());
        assert_eq!(c.error(), Some("Failed to add todo."));
        assert!(!c.loading());
    }

    #[test]
    fn finish_with_nothing_in_flight_is_a_no_op() {
        let mut c = client();
        c.finish(ok(200, list_body(vec![record("A")])));
        assert!(c.todos().is_empty());
        assert!(c.error().is_none());
    }

    #[test]
    fn begin_clears_a_dismissed_or_stale_error() {
        let mut c = client();
        c.draft_mut().title = String::new();
        assert!(c.begin_create().is_none());
        assert!(c.error().is_some());

        c.begin_list().unwrap();
        assert!(c.error().is_none(), "starting an operation clears the banner");
        c.finish(ok(200, list_body(Vec::new())));
    }

    #[test]
    fn from_env_requires_the_variable() {
        // Runs without the variable set in the test environment.
        std::env::remove_var(API_URL_ENV);
        assert!(TodoListClient::from_env().is_none());
    }
}
