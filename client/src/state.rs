//! Application state container for the todo list UI.
//!
//! # Design
//! `AppState` is the single consistent snapshot a UI binding renders from:
//! the mirrored record list, the shared `loading` flag and error slot, the
//! new-todo draft, and at most one edit buffer. It is mutated only through
//! named transition methods (`list_loaded`, `record_created`,
//! `operation_failed`, ...) driven by the controller, so every state change
//! corresponds to exactly one observable event in an operation's lifecycle.
//! The container knows nothing about HTTP or any particular UI toolkit.

use uuid::Uuid;

use crate::types::{CreateTodo, Priority, TodoRecord, UpdateTodo};

/// Form buffer for a new todo. Cleared on successful create, retained on
/// failure so the user does not lose input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Draft {
    /// Convert the buffer into a create payload. An empty description is
    /// omitted rather than sent as an empty string.
    pub fn to_create(&self) -> CreateTodo {
        CreateTodo {
            title: self.title.clone(),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            priority: self.priority,
        }
    }
}

/// Edit buffer for the record currently being edited. Seeded from the
/// record by `start_edit`, discarded on save or cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
}

impl EditDraft {
    fn from_record(record: &TodoRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone().unwrap_or_default(),
            priority: record.priority,
            completed: record.completed,
        }
    }

    /// Convert the buffer into a full-replacement update payload.
    pub fn to_update(&self) -> UpdateTodo {
        UpdateTodo {
            title: self.title.clone(),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            priority: self.priority,
            completed: self.completed,
        }
    }
}

/// Which branch of the list area a UI binding should render.
#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    /// Initial load: a request is in flight and nothing is cached yet.
    Loading,
    /// Nothing to show — prompt the user to add a todo.
    Empty,
    /// The mirrored records, in server order.
    Todos(&'a [TodoRecord]),
}

/// The complete client-side application state.
///
/// The remote collection is the source of truth; `todos` is a cache patched
/// only by confirmed server responses. `loading` and `error` are shared
/// across all operations — one flag, one slot, matching the single-operation
/// concurrency model.
#[derive(Debug, Default)]
pub struct AppState {
    todos: Vec<TodoRecord>,
    loading: bool,
    error: Option<String>,
    draft: Draft,
    editing: Option<(Uuid, EditDraft)>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- reads ---

    pub fn todos(&self) -> &[TodoRecord] {
        &self.todos
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing.as_ref().map(|(id, _)| *id)
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.editing.as_ref().map(|(_, draft)| draft)
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut().map(|(_, draft)| draft)
    }

    pub fn list_view(&self) -> ListView<'_> {
        if self.loading && self.todos.is_empty() {
            ListView::Loading
        } else if self.todos.is_empty() {
            ListView::Empty
        } else {
            ListView::Todos(&self.todos)
        }
    }

    /// Clear the error banner. Does not retry anything.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- edit lifecycle ---

    /// Seed the edit buffer from the record with `id`. Returns false (and
    /// changes nothing) when no such record exists.
    pub(crate) fn start_edit(&mut self, id: Uuid) -> bool {
        match self.todos.iter().find(|t| t.id == id) {
            Some(record) => {
                self.editing = Some((id, EditDraft::from_record(record)));
                true
            }
            None => false,
        }
    }

    pub(crate) fn exit_edit(&mut self) {
        self.editing = None;
    }

    // --- operation transitions ---

    /// A round trip is about to be issued: set the shared loading flag and
    /// clear any stale error.
    pub(crate) fn operation_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A local precondition failed before any network call. Surfaces the
    /// message without touching `loading`.
    pub(crate) fn validation_failed(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    /// `list` succeeded: replace the whole cache with the server's ordering.
    pub(crate) fn list_loaded(&mut self, todos: Vec<TodoRecord>) {
        self.todos = todos;
        self.loading = false;
    }

    /// `create` succeeded: append the confirmed record and reset the draft.
    pub(crate) fn record_created(&mut self, todo: TodoRecord) {
        self.todos.push(todo);
        self.draft = Draft::default();
        self.loading = false;
    }

    /// An update round trip succeeded: replace the record matching the
    /// server-returned id wholesale, leaving every other record untouched.
    pub(crate) fn record_replaced(&mut self, todo: TodoRecord) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *slot = todo;
        }
        self.loading = false;
    }

    /// `delete` succeeded: drop the record with `id`.
    pub(crate) fn record_removed(&mut self, id: Uuid) {
        self.todos.retain(|t| t.id != id);
        self.loading = false;
    }

    /// Any round trip failed: store the user-facing message and reset
    /// `loading`. List, draft, and edit buffer are deliberately untouched.
    pub(crate) fn operation_failed(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }
}
