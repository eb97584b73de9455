//! CRUD client for the `/tasks` resource.
//!
//! # Design
//! `TaskApi` wraps one [`HttpClient`] and normalizes the backend's two
//! possible list shapes (Spring paginated envelope or bare array) into a
//! plain `Vec<Task>`. Every failure is logged here before propagating, and
//! `list` converts an upstream 404 into an empty collection — a missing
//! resource means "no tasks yet", not an error. `get` deliberately keeps the
//! opposite behavior: a 404 for a specific id surfaces as an error.
//!
//! The [`TaskService`] trait is the seam the store depends on, so tests can
//! substitute a scripted in-memory service for the real client.

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpClient, HttpConfig};
use crate::types::{CreateTaskRequest, PageResponse, Task, UpdateTaskRequest};

/// The five operations the task store needs from a backend.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, ApiError>;
    async fn get(&self, id: &str) -> Result<Task, ApiError>;
    async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ApiError>;
    async fn update(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ApiError>;
    async fn remove(&self, id: &str) -> Result<(), ApiError>;
}

/// List responses arrive either wrapped in a paginated envelope or as a
/// bare array, depending on the backend flavor. Anything else normalizes
/// to an empty collection rather than a decode failure.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Page(PageResponse<Task>),
    Tasks(Vec<Task>),
    Other(serde::de::IgnoredAny),
}

impl ListResponse {
    fn into_tasks(self) -> Vec<Task> {
        match self {
            ListResponse::Page(page) => page.content,
            ListResponse::Tasks(tasks) => tasks,
            ListResponse::Other(_) => Vec::new(),
        }
    }
}

/// HTTP client for the task API.
#[derive(Debug, Clone)]
pub struct TaskApi {
    http: HttpClient,
}

impl TaskApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(HttpConfig::new(config.base_url))?,
        })
    }

    /// Build a client from `TASKLIST_API_BASE_URL` (or the local default).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env())
    }

    /// Fetch up to 1000 tasks. A 404 yields an empty collection.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        match self.http.get::<ListResponse>("/tasks?size=1000", None).await {
            Ok(response) => Ok(response.into_tasks()),
            Err(ApiError::Http { status: 404, .. }) => Ok(Vec::new()),
            Err(err) => {
                tracing::error!("failed to list tasks: {err}");
                Err(err)
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Task, ApiError> {
        self.http
            .get(&format!("/tasks/{id}"), None)
            .await
            .map_err(|err| {
                tracing::error!("failed to fetch task {id}: {err}");
                err
            })
    }

    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        self.http.post("/tasks", request, None).await.map_err(|err| {
            tracing::error!("failed to create task: {err}");
            err
        })
    }

    pub async fn update(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
        self.http
            .put(&format!("/tasks/{id}"), request, None)
            .await
            .map_err(|err| {
                tracing::error!("failed to update task {id}: {err}");
                err
            })
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.http
            .delete(&format!("/tasks/{id}"), None)
            .await
            .map_err(|err| {
                tracing::error!("failed to delete task {id}: {err}");
                err
            })
    }
}

#[async_trait]
impl TaskService for TaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        TaskApi::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Task, ApiError> {
        TaskApi::get(self, id).await
    }

    async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        TaskApi::create(self, request).await
    }

    async fn update(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task, ApiError> {
        TaskApi::update(self, id, request).await
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        TaskApi::remove(self, id).await
    }
}
