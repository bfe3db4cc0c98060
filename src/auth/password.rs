use bcrypt::{hash, verify};

use crate::error::AppError;

/// bcrypt work factor for newly stored passwords.
pub const BCRYPT_COST: u32 = 12;

/// Salts and hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, BCRYPT_COST)?)
}

/// One-way comparison against a stored hash.
///
/// A stored hash that bcrypt cannot parse is an internal error rather than a failed login.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).map_err(|e| {
        AppError::InternalServerError(format!("Stored password hash is unusable: {}", e))
    })
}
