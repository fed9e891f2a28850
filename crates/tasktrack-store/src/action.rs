use tasktrack_services::{Group, Todo};

/// Events applied to [`crate::AppState`] by [`crate::reduce`].
///
/// Everything except the `*FetchStarted` markers and `SelectGroup` records
/// a response the server has already acknowledged.
#[derive(Debug, Clone)]
pub enum Action {
    TodosFetchStarted,
    TodosFetched(Vec<Todo>),
    TodosFetchFailed(String),
    TodoCreated(Todo),
    TodoUpdated(Todo),
    TodoDeleted(String),

    GroupsFetchStarted,
    GroupsFetched(Vec<Group>),
    GroupsFetchFailed(String),
    GroupCreated(Group),
    GroupUpdated(Group),
    GroupDeleted(String),

    /// Local-only filter; `None` shows every group.
    SelectGroup(Option<String>),
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::TodosFetchStarted => "todos/fetch/pending",
            Action::TodosFetched(_) => "todos/fetch/fulfilled",
            Action::TodosFetchFailed(_) => "todos/fetch/rejected",
            Action::TodoCreated(_) => "todos/create",
            Action::TodoUpdated(_) => "todos/update",
            Action::TodoDeleted(_) => "todos/delete",
            Action::GroupsFetchStarted => "groups/fetch/pending",
            Action::GroupsFetched(_) => "groups/fetch/fulfilled",
            Action::GroupsFetchFailed(_) => "groups/fetch/rejected",
            Action::GroupCreated(_) => "groups/create",
            Action::GroupUpdated(_) => "groups/update",
            Action::GroupDeleted(_) => "groups/delete",
            Action::SelectGroup(_) => "groups/select",
        }
    }
}
