//! Page-level handlers: validate input, build records, call the store.
//!
//! Validation failures are notified and returned without touching the network.

use std::sync::Arc;

use chrono::Utc;
use tasktrack_core::{AppError, ValidationError};
use tasktrack_services::{Group, Todo, TodoCreateRequest};

use crate::notify::Notification;
use crate::store::{Store, TodoChange};

/// Input for a new todo.
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub heading: String,
    pub body: String,
    /// Target group; defaults to the selected group, then Ungrouped.
    pub group_id: Option<String>,
}

/// Field edits for an existing todo.
#[derive(Debug, Clone)]
pub struct TodoEdit {
    pub heading: String,
    pub body: String,
    pub group_id: String,
    pub is_starred: bool,
}

fn reject<T>(store: &Store, err: ValidationError) -> Result<T, AppError> {
    tracing::debug!("Rejected before sending: {}", err);
    store.notify(Notification::error(err.user_message()));
    Err(err.into())
}

#[derive(Clone)]
pub struct TodoController {
    store: Arc<Store>,
}

impl TodoController {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    fn current(&self, id: &str) -> Result<Todo, AppError> {
        match self.store.read(|s| s.find_todo(id).cloned()) {
            Some(todo) => Ok(todo),
            None => reject(&self.store, ValidationError::UnknownTodo(id.to_string())),
        }
    }

    pub async fn create(&self, draft: TodoDraft) -> Result<Todo, AppError> {
        let heading = draft.heading.trim();
        if heading.is_empty() {
            return reject(&self.store, ValidationError::EmptyHeading);
        }

        let group_id = match draft.group_id {
            Some(id) => id,
            None => self.store.read(|s| s.default_group_id()),
        };
        let request = TodoCreateRequest::new(heading, draft.body, group_id);
        self.store.create_todo(request).await
    }

    /// Flip completion; completing stamps `completedDate`, un-completing clears it.
    pub async fn toggle_complete(&self, id: &str) -> Result<Todo, AppError> {
        let todo = self.current(id)?;
        let change = if todo.is_complete {
            TodoChange::Uncomplete
        } else {
            TodoChange::Complete
        };
        self.store
            .update_todo(todo.with_completion_toggled(Utc::now()), change)
            .await
    }

    pub async fn toggle_star(&self, id: &str) -> Result<Todo, AppError> {
        let todo = self.current(id)?;
        let change = if todo.is_starred {
            TodoChange::Unstar
        } else {
            TodoChange::Star
        };
        self.store.update_todo(todo.with_star_toggled(), change).await
    }

    pub async fn edit(&self, id: &str, edit: TodoEdit) -> Result<Todo, AppError> {
        let mut todo = self.current(id)?;
        let heading = edit.heading.trim();
        if heading.is_empty() {
            return reject(&self.store, ValidationError::EmptyHeading);
        }

        let (group_id, group_name) = self.store.read(|s| s.resolve_group(&edit.group_id));
        todo.heading = heading.to_string();
        todo.body = edit.body;
        todo.group_id = group_id;
        todo.group_name = group_name;
        todo.is_starred = edit.is_starred;

        self.store.update_todo(todo, TodoChange::Edit).await
    }

    /// Delete by id. Unknown ids still go to the server, which reports the failure.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_todo(id).await
    }
}

#[derive(Clone)]
pub struct GroupController {
    store: Arc<Store>,
}

impl GroupController {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn add(&self, name: &str) -> Result<Group, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return reject(&self.store, ValidationError::EmptyGroupName);
        }
        self.store.create_group(name).await
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Group, AppError> {
        let (known, ungrouped) = self
            .store
            .read(|s| (s.groups.find(id).is_some(), s.is_ungrouped(id)));
        if ungrouped {
            return reject(&self.store, ValidationError::UngroupedRename);
        }
        if !known {
            return reject(&self.store, ValidationError::UnknownGroup(id.to_string()));
        }

        let name = name.trim();
        if name.is_empty() {
            return reject(&self.store, ValidationError::EmptyGroupName);
        }
        self.store.update_group(id, name).await
    }

    /// Delete a group other than Ungrouped; its todos fall back to Ungrouped.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.store.read(|s| s.is_ungrouped(id)) {
            return reject(&self.store, ValidationError::UngroupedDelete);
        }
        self.store.delete_group(id).await
    }

    pub fn select(&self, id: Option<String>) {
        self.store.select_group(id);
    }
}
