//! Domain service for registration, login and viewer credential management.
//!
//! One username space covers both account tables: admins and viewers may
//! never share a username, and login resolves admins first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to authentication operations. Display strings are the
/// client-facing messages.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid old password")]
    WrongPassword,

    #[error("Incorrect security answer")]
    WrongSecurityAnswer,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Which portal an authenticated user belongs to. Evaluated once per
/// request by the router middleware, never read from process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Viewer => "viewer",
        }
    }
}

/// Identity DTO stored in the session and echoed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
    pub username: String,
    pub display_name: String,
}

/// Registration payload after wire-level presence checks.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub cid: i32,
}

/// Password-change payload for the viewer portal.
#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
    pub security_answer: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a viewer account and returns the identity to log in with.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] when the username exists in
    /// either account table.
    async fn register(&self, input: RegisterInput) -> Result<AuthenticatedUser, AuthError>;

    /// Verifies credentials, trying the admin table first.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on unknown username or
    /// hash mismatch, indistinguishably.
    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Rotates a viewer's password after checking the old password and the
    /// stored security answer (compared trimmed).
    ///
    /// # Errors
    ///
    /// - [`AuthError::WrongPassword`] on old-password mismatch.
    /// - [`AuthError::WrongSecurityAnswer`] on answer mismatch.
    /// - [`AuthError::Validation`] when no security answer is on file.
    async fn change_password(
        &self,
        account: i32,
        input: ChangePasswordInput,
    ) -> Result<(), AuthError>;

    /// The viewer's stored security question, `None` when unset.
    async fn security_question(&self, account: i32) -> Result<Option<String>, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), "\"viewer\"");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn auth_error_display() {
        assert_eq!(AuthError::UsernameTaken.to_string(), "Username already exists");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
        assert_eq!(
            AuthError::Validation("Missing required fields".to_string()).to_string(),
            "Missing required fields"
        );
    }
}
