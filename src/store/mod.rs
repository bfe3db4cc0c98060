//! Persistence for tasks and users.
//!
//! Both stores are traits so the controllers can run against PostgreSQL in production and
//! against the in-memory implementations in tests or when no database is configured.
//! Each operation touches a single record (or a single filtered statement); consistency
//! beyond that is left to the backing store.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskPatch, User};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

/// Message used for every missing-task error.
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Storage operations for tasks.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Every task, in insertion order.
    async fn find_all(&self) -> Result<Vec<Task>, AppError>;

    /// Tasks whose completion flag equals `completed`, in insertion order.
    async fn find_by_status(&self, completed: bool) -> Result<Vec<Task>, AppError>;

    /// Returns `AppError::NotFound` when no task has this id.
    async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError>;

    async fn insert(&self, new_task: NewTask) -> Result<Task, AppError>;

    /// Applies `patch` and returns the updated task, or `AppError::NotFound`.
    async fn update_by_id(&self, id: Uuid, patch: TaskPatch) -> Result<Task, AppError>;

    /// Removes the task and returns it, or `AppError::NotFound`.
    async fn delete_by_id(&self, id: Uuid) -> Result<Task, AppError>;

    /// Removes every task and returns how many were deleted.
    async fn delete_all(&self) -> Result<u64, AppError>;

    async fn delete_by_status(&self, completed: bool) -> Result<u64, AppError>;
}

/// Storage operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::BadRequest` when the email is already registered.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, AppError>;
}

pub(crate) fn task_not_found() -> AppError {
    AppError::NotFound(TASK_NOT_FOUND.into())
}

pub(crate) fn email_taken() -> AppError {
    AppError::BadRequest("Email already registered".into())
}
