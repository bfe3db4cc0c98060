use std::fmt;
use std::sync::Arc;

use crate::auth::{verify_password, UserIdentity};
use crate::error::AppError;
use crate::store::UserStore;

/// Message sent to the client for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Why a login was refused. Only the server log ever sees the distinction.
#[derive(Debug)]
pub enum AuthFailure {
    /// No account with that email.
    UnknownUser,
    /// The account exists but the password does not match.
    BadCredentials,
    /// The lookup or hash comparison itself failed.
    Internal(AppError),
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthFailure::UnknownUser => write!(f, "unknown user"),
            AuthFailure::BadCredentials => write!(f, "bad credentials"),
            AuthFailure::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> AppError {
        match failure {
            AuthFailure::UnknownUser | AuthFailure::BadCredentials => {
                AppError::Unauthorized(INVALID_CREDENTIALS.into())
            }
            AuthFailure::Internal(e) => e,
        }
    }
}

/// Checks an email/password pair against the stored bcrypt hash.
#[derive(Clone)]
pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn verify(&self, email: &str, password: &str) -> Result<UserIdentity, AuthFailure> {
        let user = match self.users.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::warn!("Login attempt failed: no user found with email {}", email);
                return Err(AuthFailure::UnknownUser);
            }
            Err(e) => {
                log::error!("Error during credential lookup: {}", e);
                return Err(AuthFailure::Internal(e));
            }
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {
                log::info!("User authenticated: {}", email);
                Ok(UserIdentity::new(user.id))
            }
            Ok(false) => {
                log::warn!("Login attempt failed: incorrect password for email {}", email);
                Err(AuthFailure::BadCredentials)
            }
            Err(e) => Err(AuthFailure::Internal(e)),
        }
    }
}
