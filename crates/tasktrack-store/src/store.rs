//! Observable store: REST calls in, acknowledged actions through the reducer,
//! snapshots out to subscribers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tasktrack_core::{AppError, ConfigError, UngroupedConfig};
use tasktrack_services::{
    ApiClient, ApiResult, Group, GroupCreateRequest, GroupUpdateRequest, Todo, TodoCreateRequest,
    TodoQuery,
};

use crate::action::Action;
use crate::notify::{Notification, Notifier};
use crate::reducer::reduce;
use crate::state::AppState;

type Subscriber = Arc<dyn Fn(&AppState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Which kind of todo update is being sent; picks the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoChange {
    Edit,
    Complete,
    Uncomplete,
    Star,
    Unstar,
}

impl TodoChange {
    pub fn success_message(self) -> &'static str {
        match self {
            TodoChange::Edit => "Todo updated",
            TodoChange::Complete => "Todo completed",
            TodoChange::Uncomplete => "Todo unmarked",
            TodoChange::Star => "Todo starred",
            TodoChange::Unstar => "Todo unstarred",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            TodoChange::Star | TodoChange::Unstar => "Failed to star todo",
            _ => "Failed to update todo",
        }
    }
}

/// Shared application store.
///
/// State lives behind a mutex that is never held across an await, so
/// overlapping operations interleave freely; the last response to arrive
/// wins. Mutations touch local state only after the server acknowledges.
pub struct Store {
    api: ApiClient,
    state: Mutex<AppState>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
    notifier: Arc<dyn Notifier>,
}

impl Store {
    pub fn new(api: ApiClient, ungrouped: UngroupedConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            state: Mutex::new(AppState::new(ungrouped)),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            notifier,
        }
    }

    /// Run an action through the reducer and tell subscribers.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!("dispatch {}", action.name());

        let snapshot = {
            let mut state = self.state.lock();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action);
            state.clone()
        };

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    /// Register a callback invoked with the new state after every dispatch.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&AppState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Arc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Read from the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Notify about a finished mutation and convert its error.
    fn report<T>(&self, result: ApiResult<T>, success: &str, failure: &str) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                self.notify(Notification::success(success));
                Ok(value)
            }
            Err(e) => {
                tracing::error!("{}: {}", failure, e);
                self.notify(Notification::error(failure));
                Err(e.into())
            }
        }
    }

    // Collection fetches

    /// Fetch all groups. Failures are recorded on the collection, not notified.
    pub async fn fetch_groups(&self) -> Result<(), AppError> {
        self.dispatch(Action::GroupsFetchStarted);
        match self.api.list_groups().await {
            Ok(groups) => {
                self.dispatch(Action::GroupsFetched(groups));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch groups: {}", e);
                self.dispatch(Action::GroupsFetchFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Fetch all todos, resolving each against the groups loaded so far.
    pub async fn fetch_todos(&self) -> Result<(), AppError> {
        self.dispatch(Action::TodosFetchStarted);
        match self.api.list_todos(&TodoQuery::all()).await {
            Ok(todos) => {
                self.dispatch(Action::TodosFetched(todos));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch todos: {}", e);
                self.dispatch(Action::TodosFetchFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Completed todos straight from the server (`?isComplete=true`).
    ///
    /// The result is normalized but not stored.
    pub async fn fetch_completed_todos(&self) -> Result<Vec<Todo>, AppError> {
        let todos = self
            .api
            .list_todos(&TodoQuery::completed())
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch completed items: {}", e);
                AppError::from(e)
            })?;
        Ok(self.read(|state| todos.into_iter().map(|t| state.normalize(t)).collect()))
    }

    /// Fetch each collection that has never been fetched. Groups go first so
    /// todos resolve against them; if that fails, todos still load and keep
    /// their server group ids until a groups fetch succeeds.
    pub async fn ensure_loaded(&self) -> Result<(), AppError> {
        let (groups_idle, todos_idle) = self.read(|s| {
            (
                s.groups.status.can_start_fetch(),
                s.todos.status.can_start_fetch(),
            )
        });

        let groups = if groups_idle {
            self.fetch_groups().await
        } else {
            Ok(())
        };
        let todos = if todos_idle {
            self.fetch_todos().await
        } else {
            Ok(())
        };
        groups.and(todos)
    }

    /// Start-up load: groups, the Ungrouped check, then todos.
    pub async fn bootstrap(&self) -> Result<(), AppError> {
        self.fetch_groups().await?;

        let (missing, required, name) = self.read(|s| {
            (
                s.groups.ungrouped_id.is_none(),
                s.ungrouped.require_on_startup,
                s.ungrouped.name.clone(),
            )
        });
        if missing {
            if required {
                tracing::error!("Server has no '{}' group", name);
                return Err(ConfigError::MissingUngroupedGroup(name).into());
            }
            tracing::warn!("Server has no '{}' group; using the placeholder id", name);
        }

        self.fetch_todos().await
    }

    // Todo mutations

    /// Create a todo, stamping `createdDate` now.
    pub async fn create_todo(&self, mut request: TodoCreateRequest) -> Result<Todo, AppError> {
        request.created_date = Some(Utc::now());

        let result = self.api.create_todo(&request).await.map(|todo| {
            self.dispatch(Action::TodoCreated(todo.clone()));
            self.read(|s| s.normalize(todo))
        });
        self.report(result, "Todo created", "Failed to create todo")
    }

    /// Send the full record; replace the local entry on success.
    pub async fn update_todo(&self, todo: Todo, change: TodoChange) -> Result<Todo, AppError> {
        let result = self.api.update_todo(&todo).await.map(|updated| {
            self.dispatch(Action::TodoUpdated(updated.clone()));
            self.read(|s| s.normalize(updated))
        });
        self.report(result, change.success_message(), change.failure_message())
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), AppError> {
        let result = self
            .api
            .delete_todo(id)
            .await
            .map(|()| self.dispatch(Action::TodoDeleted(id.to_string())));
        self.report(result, "Todo deleted", "Failed to delete todo")
    }

    // Group mutations

    pub async fn create_group(&self, name: &str) -> Result<Group, AppError> {
        let result = self
            .api
            .create_group(&GroupCreateRequest::new(name))
            .await
            .map(|group| {
                self.dispatch(Action::GroupCreated(group.clone()));
                group
            });
        self.report(result, "Group added successfully.", "Failed to add group.")
    }

    pub async fn update_group(&self, id: &str, name: &str) -> Result<Group, AppError> {
        let request = GroupUpdateRequest {
            name: name.to_string(),
        };
        let result = self.api.update_group(id, &request).await.map(|group| {
            self.dispatch(Action::GroupUpdated(group.clone()));
            group
        });
        self.report(result, "Group updated", "Failed to update group.")
    }

    /// Delete a group. Does not refuse Ungrouped; that check belongs to the caller.
    pub async fn delete_group(&self, id: &str) -> Result<(), AppError> {
        let result = self
            .api
            .delete_group(id)
            .await
            .map(|()| self.dispatch(Action::GroupDeleted(id.to_string())));
        self.report(result, "Group deleted", "Failed to delete group.")
    }

    /// Set the group filter. Local only.
    pub fn select_group(&self, id: Option<String>) {
        self.dispatch(Action::SelectGroup(id));
    }
}
