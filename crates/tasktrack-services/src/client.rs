// crates/tasktrack-services/src/client.rs

use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tasktrack_core::{ApiConfig, ConfigError, NetworkError, ReqwestErrorExt};
use url::Url;

use crate::group::{Group, GroupCreateRequest, GroupUpdateRequest};
use crate::todo::{Todo, TodoCreateRequest, TodoQuery};

/// Result type for REST operations.
pub type ApiResult<T> = Result<T, NetworkError>;

const GROUPS: &str = "groups";
const ITEMS: &str = "items";

/// REST client for the todo backend.
///
/// Every request carries the fixed timeout and JSON content type. Failures
/// are logged once here; callers decide how to surface them. Nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Arc<Client>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::Invalid(format!("API base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "API base URL '{}' cannot have paths",
                base_url
            )));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with the given path segments appended (ids are percent-encoded).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    /// Send a request and unwrap the JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, what).await?;
        response.json::<T>().await.map_err(|e| {
            let err = NetworkError::InvalidResponse(e.to_string());
            tracing::error!("API error: {} returned an unreadable body: {}", what, err);
            err
        })
    }

    /// Send a request, mapping transport failures and non-2xx statuses.
    async fn send(&self, request: RequestBuilder, what: &str) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            let err = e.into_network_error();
            tracing::error!("API error: {} failed: {}", what, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let err = NetworkError::ServerError {
                status: status.as_u16(),
                message,
            };
            tracing::error!("API error: {} failed: {}", what, err);
            return Err(err);
        }

        Ok(response)
    }

    // Groups

    pub async fn list_groups(&self) -> ApiResult<Vec<Group>> {
        tracing::debug!("Fetching groups");
        let groups: Vec<Group> = self
            .send_json(self.request(Method::GET, &[GROUPS]), "list groups")
            .await?;
        tracing::info!("Fetched {} groups", groups.len());
        Ok(groups)
    }

    pub async fn create_group(&self, req: &GroupCreateRequest) -> ApiResult<Group> {
        tracing::debug!("Creating group: {}", req.name);
        let group: Group = self
            .send_json(self.request(Method::POST, &[GROUPS]).json(req), "create group")
            .await?;
        tracing::info!("Created group {} ({})", group.name, group.id);
        Ok(group)
    }

    pub async fn update_group(&self, id: &str, req: &GroupUpdateRequest) -> ApiResult<Group> {
        tracing::debug!("Renaming group {} to {}", id, req.name);
        self.send_json(
            self.request(Method::PATCH, &[GROUPS, id]).json(req),
            "update group",
        )
        .await
    }

    pub async fn delete_group(&self, id: &str) -> ApiResult<()> {
        tracing::debug!("Deleting group {}", id);
        self.send(self.request(Method::DELETE, &[GROUPS, id]), "delete group")
            .await?;
        tracing::info!("Deleted group {}", id);
        Ok(())
    }

    // Todos

    pub async fn list_todos(&self, query: &TodoQuery) -> ApiResult<Vec<Todo>> {
        tracing::debug!("Fetching todos ({:?})", query);
        let todos: Vec<Todo> = self
            .send_json(
                self.request(Method::GET, &[ITEMS]).query(query),
                "list todos",
            )
            .await?;
        tracing::info!("Fetched {} todos", todos.len());
        Ok(todos)
    }

    pub async fn create_todo(&self, req: &TodoCreateRequest) -> ApiResult<Todo> {
        tracing::debug!("Creating todo: {}", req.heading);
        let todo: Todo = self
            .send_json(self.request(Method::POST, &[ITEMS]).json(req), "create todo")
            .await?;
        tracing::info!("Created todo {}", todo.id);
        Ok(todo)
    }

    /// Update a todo with the complete record (`PATCH /items/:id`).
    pub async fn update_todo(&self, todo: &Todo) -> ApiResult<Todo> {
        tracing::debug!("Updating todo {}", todo.id);
        self.send_json(
            self.request(Method::PATCH, &[ITEMS, todo.id.as_str()]).json(todo),
            "update todo",
        )
        .await
    }

    pub async fn delete_todo(&self, id: &str) -> ApiResult<()> {
        tracing::debug!("Deleting todo {}", id);
        self.send(self.request(Method::DELETE, &[ITEMS, id]), "delete todo")
            .await?;
        tracing::info!("Deleted todo {}", id);
        Ok(())
    }
}
