//! Authentication: password hashing, credential checks, session tokens and the
//! middleware that gates mutating routes.

pub mod credentials;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use credentials::{AuthFailure, CredentialVerifier};
pub use extractors::UserIdentity;
pub use middleware::{AuthGate, TOKEN_COOKIE};
pub use password::{hash_password, verify_password};
pub use token::{Claims, InvalidToken, TokenService};

/// Response body after a successful login or registration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The signed session token, also set as the `token` cookie.
    pub token: String,
    pub user_id: Uuid,
}
