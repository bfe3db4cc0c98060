#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "A task-management REST API: public task listing, JWT-gated task mutations,"]
#![doc = "and email/password accounts. The binary (`main.rs`) wires configuration,"]
#![doc = "storage and these modules into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
