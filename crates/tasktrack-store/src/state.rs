use tasktrack_core::{FetchStatus, UngroupedConfig};
use tasktrack_services::{Group, Todo};

use crate::stats::{self, TodoStats};

#[derive(Debug, Clone, Default)]
pub struct TodosState {
    pub items: Vec<Todo>,
    pub status: FetchStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GroupsState {
    pub items: Vec<Group>,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub selected_group_id: Option<String>,
    /// Id of the Ungrouped group, cached from the first fetch that has one.
    pub ungrouped_id: Option<String>,
    /// Set once a groups fetch has succeeded. Until then group ids are
    /// kept as the server sent them.
    pub loaded: bool,
}

impl GroupsState {
    pub fn find(&self, id: &str) -> Option<&Group> {
        self.items.iter().find(|g| g.id == id)
    }
}

/// Whole client state: both collections plus the Ungrouped settings.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub todos: TodosState,
    pub groups: GroupsState,
    pub ungrouped: UngroupedConfig,
}

impl AppState {
    pub fn new(ungrouped: UngroupedConfig) -> Self {
        Self {
            ungrouped,
            ..Self::default()
        }
    }

    pub fn find_todo(&self, id: &str) -> Option<&Todo> {
        self.todos.items.iter().find(|t| t.id == id)
    }

    /// Group id todos fall back to: the cached Ungrouped id, else the placeholder.
    pub fn ungrouped_id(&self) -> &str {
        self.groups
            .ungrouped_id
            .as_deref()
            .unwrap_or(&self.ungrouped.fallback_id)
    }

    pub fn is_ungrouped(&self, group_id: &str) -> bool {
        if group_id == self.ungrouped_id() {
            return true;
        }
        self.groups
            .find(group_id)
            .is_some_and(|g| self.ungrouped.matches(&g.name))
    }

    /// Group a new todo lands in: the selected group, else Ungrouped.
    pub fn default_group_id(&self) -> String {
        self.groups
            .selected_group_id
            .clone()
            .unwrap_or_else(|| self.ungrouped_id().to_string())
    }

    /// Resolve a todo's group reference to `(id, name)`, substituting
    /// Ungrouped when the id is empty or unknown.
    ///
    /// Before any groups have loaded nothing is known to be missing, so the
    /// id is returned untouched and without a name.
    pub fn resolve_group(&self, group_id: &str) -> (String, Option<String>) {
        if let Some(group) = self.groups.find(group_id) {
            return (group.id.clone(), Some(group.name.clone()));
        }
        if !self.groups.loaded {
            return (group_id.to_string(), None);
        }

        let id = self.ungrouped_id().to_string();
        let name = self
            .groups
            .find(&id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| self.ungrouped.name.clone());
        (id, Some(name))
    }

    /// Todo with its group reference resolved.
    pub fn normalize(&self, mut todo: Todo) -> Todo {
        let (id, name) = self.resolve_group(&todo.group_id);
        todo.group_id = id;
        todo.group_name = name;
        todo
    }

    /// Todos under the current group selection.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        stats::filtered_todos(
            &self.todos.items,
            self.groups.selected_group_id.as_deref(),
        )
    }

    /// Counts over the current group selection.
    pub fn stats(&self) -> TodoStats {
        TodoStats::from_todos(self.visible_todos())
    }

    /// "N / M Done" for the current selection, or "Loading..." mid-fetch.
    pub fn done_summary(&self) -> String {
        stats::done_summary(&self.stats(), self.todos.status.is_loading())
    }

    /// Page heading for the current selection.
    pub fn selection_title(&self) -> String {
        match self.groups.selected_group_id.as_deref() {
            None => "Todos".to_string(),
            Some(id) => self
                .groups
                .find(id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| "Unknown Group".to_string()),
        }
    }
}
