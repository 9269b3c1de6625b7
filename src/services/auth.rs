//! Password hashing and the authorization guard for lending operations

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::User,
};

/// Hash a password using Argon2
pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string
pub(crate) fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Whether a stored string parses as a PHC password hash
pub(crate) fn is_valid_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

/// Guard for gated catalog operations: the acting user must be authenticated.
pub fn require_authenticated(user: &User, operation: &str) -> AppResult<()> {
    if user.authenticated {
        Ok(())
    } else {
        tracing::warn!("Refused {} for unauthenticated user {}", operation, user.email);
        Err(AppError::Unauthorized(format!(
            "{} must be logged in to {}",
            user.name, operation
        )))
    }
}
