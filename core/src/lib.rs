//! Client library for the task-list service.
//!
//! # Overview
//! Fetches, creates, updates, and deletes task records from the REST
//! backend, keeps a reactive local mirror of the collection, and surfaces
//! transient notifications to the user.
//!
//! # Design
//! - [`HttpClient`] wraps a configured `reqwest` client: base URL, 10 s
//!   default timeout, JSON default headers, and 404/500 diagnostics.
//! - [`TaskApi`] exposes the `/tasks` CRUD operations and normalizes the
//!   paginated-envelope and bare-array list shapes; it implements
//!   [`TaskService`], the seam the store is tested through.
//! - [`TaskStore`] mirrors the remote collection behind a watch channel
//!   with loading/error bookkeeping on every action.
//! - [`Notifier`] holds the single auto-dismissing notification slot.
//! - [`extract_error_message`] maps any failure to a user-facing string.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod store;
pub mod types;

pub use api::{TaskApi, TaskService};
pub use config::ApiConfig;
pub use error::{extract_error_message, ApiError};
pub use http::{HttpClient, HttpConfig, RequestOptions};
pub use notify::{Notification, NotificationKind, Notifier};
pub use store::{TaskStore, TaskStoreState, TasksByStatus};
pub use types::{CreateTaskRequest, PageResponse, Task, TaskStatus, UpdateTaskRequest};
