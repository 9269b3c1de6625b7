//! User model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::AppResult, services::auth};

/// Position of a user inside the catalog's user list
pub type UserId = usize;

/// A registered reader.
///
/// The password is only kept as an Argon2 PHC string and can only be checked
/// through [`User::authenticate`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    password_hash: String,
    #[serde(default)]
    pub authenticated: bool,
}

impl User {
    /// Create a user, hashing the given password
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: &str) -> AppResult<Self> {
        Ok(Self {
            name: name.into(),
            email: email.into(),
            password_hash: auth::hash_password(password)?,
            authenticated: false,
        })
    }

    /// Build a user from validated registration input
    pub fn register(input: CreateUser) -> AppResult<Self> {
        input.validate()?;
        Self::new(input.name, input.email, &input.password)
    }

    /// Check the password. On success the user is marked authenticated;
    /// on failure the flag is left as it was.
    pub fn authenticate(&mut self, password: &str) -> AppResult<bool> {
        let valid = auth::verify_password(&self.password_hash, password)?;
        if valid {
            self.authenticated = true;
        }
        Ok(valid)
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    /// False when the stored credential is not a PHC hash string
    pub(crate) fn has_valid_hash(&self) -> bool {
        auth::is_valid_hash(&self.password_hash)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Create user request
#[derive(Debug, Clone, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "E-mail must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}
