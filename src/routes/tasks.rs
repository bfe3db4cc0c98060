//! Task controller: translates `/api/v1/task` requests into `TaskStore` calls.
//!
//! The list and clear routes take a status token (`all`, `active`, `completed`) where the
//! other routes take a task id. Mutating handlers run behind `AuthGate` and receive the
//! caller as a `UserIdentity`; tasks are shared, so the identity is only logged.

use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::{
    auth::UserIdentity,
    error::AppError,
    models::{CreateTaskRequest, StatusFilter, UpdateTaskRequest},
    state::AppState,
    store::TASK_NOT_FOUND,
};

/// Path ids that are not UUIDs cannot name a stored task.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(TASK_NOT_FOUND.into()))
}

/// `GET /api/v1/task`: every task in insertion order.
pub async fn get_list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tasks = state.tasks.find_all().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// `GET /api/v1/task/{filter}`: tasks matching a status token.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `400 Bad Request`: the token is not `all`, `active` or `completed`.
pub async fn get_part_list(
    state: web::Data<AppState>,
    filter: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filter: StatusFilter = filter.parse()?;
    let tasks = match filter.completed() {
        None => state.tasks.find_all().await?,
        Some(completed) => state.tasks.find_by_status(completed).await?,
    };
    Ok(HttpResponse::Ok().json(tasks))
}

/// `POST /api/v1/task/new`: creates a task; `isCompleted` defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: `name` missing or blank.
/// - `401 Unauthorized`: no valid token.
pub async fn create(
    state: web::Data<AppState>,
    identity: UserIdentity,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let new_task = payload.into_inner().into_new_task()?;
    let task = state.tasks.insert(new_task).await?;

    log::info!("Created new task {} ({}) for user {}", task.id, task.name, identity.id);
    Ok(HttpResponse::Created().json(task))
}

/// `PUT /api/v1/task/update/{id}`: overwrites only the fields present in the body.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: a supplied `name` is blank.
/// - `401 Unauthorized`: no valid token.
/// - `404 Not Found`: no task with that id.
pub async fn update(
    state: web::Data<AppState>,
    identity: UserIdentity,
    task_id: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_task_id(&task_id)?;
    let patch = payload.into_inner().into_patch()?;
    let task = state.tasks.update_by_id(id, patch).await?;

    log::info!("Updated task {} ({}) for user {}", task.id, task.name, identity.id);
    Ok(HttpResponse::Ok().json(task))
}

/// `DELETE /api/v1/task/delete/{id}`: removes one task and confirms with a message.
pub async fn delete(
    state: web::Data<AppState>,
    identity: UserIdentity,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_task_id(&task_id)?;
    let task = state.tasks.delete_by_id(id).await?;

    log::info!("Deleted task {} ({}) for user {}", task.id, task.name, identity.id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}

/// `DELETE /api/v1/task/clear/{filter}`: bulk removal by status token.
pub async fn clear(
    state: web::Data<AppState>,
    identity: UserIdentity,
    filter: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let filter: StatusFilter = filter.parse()?;
    let (deleted, message) = match filter {
        StatusFilter::All => (
            state.tasks.delete_all().await?,
            "All tasks deleted successfully",
        ),
        StatusFilter::Active => (
            state.tasks.delete_by_status(false).await?,
            "All active tasks deleted successfully",
        ),
        StatusFilter::Completed => (
            state.tasks.delete_by_status(true).await?,
            "All completed tasks deleted successfully",
        ),
    };

    log::info!("Cleared {} task(s) ({:?}) for user {}", deleted, filter, identity.id);
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}
