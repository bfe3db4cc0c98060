use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{email_taken, task_not_found, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskPatch, User};

/// Task store kept in process memory. A `Vec` keeps insertion order for listing.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn delete_where<F>(&self, predicate: F) -> u64
    where
        F: Fn(&Task) -> bool,
    {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| !predicate(task));
        (before - tasks.len()) as u64
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn find_by_status(&self, completed: bool) -> Result<Vec<Task>, AppError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|task| task.is_completed == completed)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(task_not_found)
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task, AppError> {
        let task = Task::new(new_task);
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_by_id(&self, id: Uuid, patch: TaskPatch) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(task_not_found)?;
        task.apply(patch);
        Ok(task.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(task_not_found)?;
        Ok(tasks.remove(index))
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        Ok(self.delete_where(|_| true).await)
    }

    async fn delete_by_status(&self, completed: bool) -> Result<u64, AppError> {
        Ok(self
            .delete_where(|task| task.is_completed == completed)
            .await)
    }
}

/// User store kept in process memory. Emails are compared exactly.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        // Check and push under one write lock so two registrations cannot race.
        let mut users = self.users.write().await;
        if users.iter().any(|user| user.email == email) {
            return Err(email_taken());
        }
        let user = User::new(email, password_hash);
        users.push(user.clone());
        Ok(user)
    }
}
