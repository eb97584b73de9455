//! In-memory task backend used by integration tests.
//!
//! Emulates the Spring service the client talks to in production: list
//! responses come wrapped in a paginated envelope, the server assigns ids
//! and RFC 3339 timestamps, `PUT` is a full replace, and missing ids answer
//! 404 with a `{"message": ...}` body. Tasks live in an insertion-ordered
//! `Vec` so list order is deterministic.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Shared body shape of `POST /tasks` and `PUT /tasks/{id}` (full replace).
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Spring-style paginated envelope returned by the list endpoint.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub content: Vec<Task>,
    pub total_elements: usize,
    pub total_pages: u32,
    pub last: bool,
    pub size: usize,
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub size: Option<usize>,
}

pub type Db = Arc<RwLock<Vec<Task>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"message": "task not found"})),
    )
}

async fn list_tasks(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Page> {
    let tasks = db.read().await;
    let size = params.size.unwrap_or(20);
    let content: Vec<Task> = tasks.iter().take(size).cloned().collect();
    Json(Page {
        total_elements: tasks.len(),
        total_pages: 1,
        last: true,
        size,
        number: 0,
        content,
    })
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<TaskRequest>,
) -> (StatusCode, Json<Task>) {
    let now = Utc::now().to_rfc3339();
    let task = Task {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        status: input.status,
        created_at: now.clone(),
        updated_at: now,
    };
    db.write().await.push(task.clone());
    (StatusCode::CREATED, Json(task))
}

async fn get_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, Json<serde_json::Value>)> {
    let tasks = db.read().await;
    tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TaskRequest>,
) -> Result<Json<Task>, (StatusCode, Json<serde_json::Value>)> {
    let mut tasks = db.write().await;
    let task = tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
    task.name = input.name;
    task.description = input.description;
    task.status = input.status;
    task.updated_at = Utc::now().to_rfc3339();
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<serde_json::Value>)> {
    let mut tasks = db.write().await;
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
