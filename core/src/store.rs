//! Reactive store mirroring the remote task collection.
//!
//! # Design
//! The store owns the local mirror of the server's task list plus a loading
//! flag and a last-error slot, all behind a watch channel: read the current
//! value with [`TaskStore::state`], subscribe to changes with
//! [`TaskStore::subscribe`]. Every action follows the same skeleton — raise
//! `loading` and clear `error` on entry, mutate the collection and show a
//! success notification on success, record the extracted message, show an
//! error notification, and hand the original failure back on failure, drop
//! `loading` on every exit. The mirror is a cache, not a source of truth:
//! it reflects the last successful response only.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::TaskService;
use crate::error::{extract_error_message, ApiError};
use crate::notify::Notifier;
use crate::types::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};

/// Snapshot of the store's observable state.
#[derive(Debug, Clone, Default)]
pub struct TaskStoreState {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The collection partitioned by status, relative order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasksByStatus {
    pub pending: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub completed: Vec<Task>,
}

/// Reactive task collection backed by a [`TaskService`].
#[derive(Clone)]
pub struct TaskStore {
    service: Arc<dyn TaskService>,
    notifier: Notifier,
    state: Arc<watch::Sender<TaskStoreState>>,
}

impl TaskStore {
    pub fn new(service: Arc<dyn TaskService>, notifier: Notifier) -> Self {
        let (state, _) = watch::channel(TaskStoreState::default());
        Self {
            service,
            notifier,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> TaskStoreState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskStoreState> {
        self.state.subscribe()
    }

    /// Number of tasks currently mirrored.
    pub fn task_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Partition the collection into the three status buckets.
    pub fn tasks_by_status(&self) -> TasksByStatus {
        let state = self.state.borrow();
        let mut partition = TasksByStatus::default();
        for task in &state.tasks {
            match task.status {
                TaskStatus::Pending => partition.pending.push(task.clone()),
                TaskStatus::InProgress => partition.in_progress.push(task.clone()),
                TaskStatus::Completed => partition.completed.push(task.clone()),
            }
        }
        partition
    }

    /// Replace the whole collection with the server's list.
    ///
    /// On failure the previous collection is deliberately kept; stale data
    /// beats an empty screen.
    pub async fn fetch_tasks(&self) -> Result<(), ApiError> {
        self.begin();
        match self.service.list().await {
            Ok(tasks) => {
                self.state.send_modify(|state| {
                    state.tasks = tasks;
                    state.loading = false;
                });
                self.notifier.success("Tasks loaded successfully!", None);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Create a task and append the server's version to the collection.
    pub async fn create_task(&self, input: &CreateTaskRequest) -> Result<Task, ApiError> {
        self.begin();
        match self.service.create(input).await {
            Ok(task) => {
                self.state.send_modify(|state| {
                    state.tasks.push(task.clone());
                    state.loading = false;
                });
                self.notifier.success("Task created successfully!", None);
                Ok(task)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Update a task and replace the first matching element in place.
    ///
    /// When the id is not mirrored locally the collection stays unchanged;
    /// that is a silent no-op, not an error.
    pub async fn update_task(
        &self,
        id: &str,
        input: &UpdateTaskRequest,
    ) -> Result<Task, ApiError> {
        self.begin();
        match self.service.update(id, input).await {
            Ok(task) => {
                self.state.send_modify(|state| {
                    if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == id) {
                        *slot = task.clone();
                    }
                    state.loading = false;
                });
                self.notifier.success("Task updated successfully!", None);
                Ok(task)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Delete a task and drop it from the collection.
    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.begin();
        match self.service.remove(id).await {
            Ok(()) => {
                self.state.send_modify(|state| {
                    state.tasks.retain(|t| t.id != id);
                    state.loading = false;
                });
                self.notifier.success("Task deleted successfully!", None);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn fail(&self, err: ApiError) -> ApiError {
        let message = extract_error_message(Some(&err));
        self.state.send_modify(|state| {
            state.error = Some(message.clone());
            state.loading = false;
        });
        self.notifier.error(message, None);
        err
    }
}
