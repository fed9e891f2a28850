use crate::action::Action;
use crate::state::AppState;

/// Apply one action to the state.
///
/// Pure: no I/O, no clocks. Todos entering the state are normalized so
/// their group reference always resolves.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::TodosFetchStarted => {
            state.todos.status = state.todos.status.on_fetch_started();
        }
        Action::TodosFetched(todos) => {
            let items: Vec<_> = todos.into_iter().map(|t| state.normalize(t)).collect();
            state.todos.items = items;
            state.todos.status = state.todos.status.on_fetch_done(true);
            state.todos.error = None;
        }
        Action::TodosFetchFailed(message) => {
            state.todos.status = state.todos.status.on_fetch_done(false);
            state.todos.error = Some(message);
        }
        Action::TodoCreated(todo) => {
            let todo = state.normalize(todo);
            state.todos.items.push(todo);
        }
        Action::TodoUpdated(todo) => {
            let todo = state.normalize(todo);
            if let Some(slot) = state.todos.items.iter_mut().find(|t| t.id == todo.id) {
                *slot = todo;
            }
        }
        Action::TodoDeleted(id) => {
            state.todos.items.retain(|t| t.id != id);
        }

        Action::GroupsFetchStarted => {
            state.groups.status = state.groups.status.on_fetch_started();
        }
        Action::GroupsFetched(groups) => {
            if state.groups.ungrouped_id.is_none() {
                state.groups.ungrouped_id = groups
                    .iter()
                    .find(|g| state.ungrouped.matches(&g.name))
                    .map(|g| g.id.clone());
            }
            state.groups.items = groups;
            state.groups.loaded = true;
            state.groups.status = state.groups.status.on_fetch_done(true);
            state.groups.error = None;
            renormalize_todos(&mut state);
        }
        Action::GroupsFetchFailed(message) => {
            state.groups.status = state.groups.status.on_fetch_done(false);
            state.groups.error = Some(message);
        }
        Action::GroupCreated(group) => {
            state.groups.items.push(group);
        }
        Action::GroupUpdated(group) => {
            if let Some(slot) = state.groups.items.iter_mut().find(|g| g.id == group.id) {
                *slot = group.clone();
            }
            for todo in state.todos.items.iter_mut().filter(|t| t.group_id == group.id) {
                todo.group_name = Some(group.name.clone());
            }
        }
        Action::GroupDeleted(id) => {
            state.groups.items.retain(|g| g.id != id);
            if state.groups.selected_group_id.as_deref() == Some(id.as_str()) {
                state.groups.selected_group_id = None;
            }
            renormalize_todos(&mut state);
        }

        Action::SelectGroup(id) => {
            state.groups.selected_group_id = id;
        }
    }
    state
}

/// Re-resolve every todo's group after the group list changed.
fn renormalize_todos(state: &mut AppState) {
    let items = std::mem::take(&mut state.todos.items);
    let items: Vec<_> = items.into_iter().map(|t| state.normalize(t)).collect();
    state.todos.items = items;
}
