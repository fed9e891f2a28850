//! Client-side state for todos and groups.
//!
//! Remote collections are mirrored into an [`AppState`] that only changes
//! through [`reduce`]. The [`Store`] issues REST calls, dispatches the
//! acknowledged results, and tells subscribers. Controllers sit on top and
//! play the part of the pages: validation, toggles, notifications.

pub mod action;
pub mod app;
pub mod controller;
pub mod notify;
pub mod reducer;
pub mod state;
pub mod stats;
pub mod store;

pub use action::Action;
pub use app::App;
pub use controller::{GroupController, TodoController, TodoDraft, TodoEdit};
pub use notify::{ChannelNotifier, Level, Notification, Notifier, TracingNotifier};
pub use reducer::reduce;
pub use state::{AppState, GroupsState, TodosState};
pub use stats::{GroupProgress, Milestone, TodoStats};
pub use store::{Store, SubscriptionId, TodoChange};
