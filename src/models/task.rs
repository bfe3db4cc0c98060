use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// A to-do record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier (UUID v4).
    pub id: Uuid,
    /// Non-empty label.
    pub name: String,
    /// Completion flag, `false` unless set.
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(new_task: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new_task.name,
            is_completed: new_task.is_completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites only the fields present in `patch`.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_completed) = patch.is_completed {
            self.is_completed = is_completed;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated data for inserting a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub is_completed: bool,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

/// Body of `POST /api/v1/task/new`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        self.validate()?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Name is required.".into()))?;

        Ok(NewTask {
            name,
            is_completed: self.is_completed.unwrap_or(false),
        })
    }
}

/// Body of `PUT /api/v1/task/update/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, AppError> {
        self.validate()?;
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::BadRequest("Name must not be empty.".into()));
        }

        Ok(TaskPatch {
            name: self.name,
            is_completed: self.is_completed,
        })
    }
}

/// The status token accepted by the list and clear routes in place of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// The `is_completed` value to match, or `None` for every task.
    pub fn completed(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(false),
            StatusFilter::Completed => Some(true),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(AppError::BadRequest("Invalid ID provided".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_to_incomplete() {
        let request = CreateTaskRequest {
            name: Some("Buy milk".to_string()),
            is_completed: None,
        };
        let new_task = request.into_new_task().unwrap();
        assert_eq!(new_task.name, "Buy milk");
        assert!(!new_task.is_completed);

        let task = Task::new(new_task);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_create_requires_name() {
        for name in [None, Some(String::new()), Some("   ".to_string())] {
            let request = CreateTaskRequest {
                name,
                is_completed: Some(true),
            };
            match request.into_new_task() {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Name is required."),
                other => panic!("expected BadRequest, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_create_rejects_long_name() {
        let request = CreateTaskRequest {
            name: Some("a".repeat(201)),
            is_completed: None,
        };
        assert!(matches!(
            request.into_new_task(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let mut task = Task::new(NewTask {
            name: "Write report".to_string(),
            is_completed: false,
        });
        let patch = UpdateTaskRequest {
            name: None,
            is_completed: Some(true),
        }
        .into_patch()
        .unwrap();

        task.apply(patch);
        assert_eq!(task.name, "Write report");
        assert!(task.is_completed);
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let request = UpdateTaskRequest {
            name: Some(String::new()),
            is_completed: None,
        };
        assert!(matches!(request.into_patch(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("active".parse::<StatusFilter>().unwrap().completed(), Some(false));
        assert_eq!("completed".parse::<StatusFilter>().unwrap().completed(), Some(true));
        assert!("Active".parse::<StatusFilter>().is_err());
        assert!("".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::new(NewTask {
            name: "Buy milk".to_string(),
            is_completed: false,
        });
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["name"], "Buy milk");
        assert_eq!(json["isCompleted"], false);
        assert!(json["id"].is_string());
        assert!(json.get("is_completed").is_none());
    }
}
