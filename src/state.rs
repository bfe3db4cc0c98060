use std::sync::Arc;

use crate::auth::{CredentialVerifier, TokenService};
use crate::config::AuthConfig;
use crate::store::{MemoryTaskStore, MemoryUserStore, TaskStore, UserStore};

/// Everything the handlers share, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
    pub credentials: CredentialVerifier,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(tasks: Arc<dyn TaskStore>, users: Arc<dyn UserStore>, auth: AuthConfig) -> Self {
        Self {
            tasks,
            credentials: CredentialVerifier::new(users.clone()),
            users,
            tokens: Arc::new(TokenService::new(&auth)),
            auth,
        }
    }

    /// State backed by empty in-memory stores.
    pub fn in_memory(auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(MemoryTaskStore::new()),
            Arc::new(MemoryUserStore::new()),
            auth,
        )
    }
}
