//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the backend's wire schema but are defined independently
//! from the mock-server crate; integration tests catch any schema drift.
//! Task ids and timestamps are server-assigned and opaque to the client, so
//! both stay plain `String`s rather than parsed types.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// A single task returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new task. The server assigns the id and
/// both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Request payload for updating an existing task. This is a full replace:
/// all three fields are sent every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Spring-style paginated envelope around list responses. Only `content` is
/// consumed; the pagination metadata is accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub last: Option<bool>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
}
