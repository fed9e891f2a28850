use std::sync::Arc;

use tasktrack_core::{AppError, Config};
use tasktrack_services::ApiClient;

use crate::controller::{GroupController, TodoController};
use crate::notify::Notifier;
use crate::store::Store;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    store: Arc<Store>,
    todos: TodoController,
    groups: GroupController,
}

impl App {
    /// Build the client, store and controllers from a loaded config.
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Result<Self, AppError> {
        let api = ApiClient::from_config(&config.api)?;
        tracing::info!("Using API at {}", api.base_url());

        let store = Arc::new(Store::new(api, config.ungrouped.clone(), notifier));

        Ok(Self {
            config: Arc::new(config),
            todos: TodoController::new(Arc::clone(&store)),
            groups: GroupController::new(Arc::clone(&store)),
            store,
        })
    }

    /// Load groups and todos; fails if the Ungrouped group is required but missing.
    pub async fn start(&self) -> Result<(), AppError> {
        tracing::info!("Loading groups and todos");
        self.store.bootstrap().await?;

        let (groups, todos) = self
            .store
            .read(|s| (s.groups.items.len(), s.todos.items.len()));
        tracing::info!("Loaded {} groups and {} todos", groups, todos);
        Ok(())
    }

    pub fn shutdown(&self) {
        // In-flight requests are not cancelled; their results are dropped with the store.
        tracing::info!("Shutting down application");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn todos(&self) -> &TodoController {
        &self.todos
    }

    pub fn groups(&self) -> &GroupController {
        &self.groups
    }
}
