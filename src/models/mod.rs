pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, NewTask, StatusFilter, Task, TaskPatch, UpdateTaskRequest};
pub use user::{LoginRequest, RegisterRequest, User};
