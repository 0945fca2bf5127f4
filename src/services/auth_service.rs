//! Domain service for authentication.
//!
//! Verifies credentials, issues bearer tokens, and resolves tokens back to
//! user accounts on each request.

use thiserror::Error;

use crate::entities::users;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately one variant for both,
    /// so a caller cannot probe which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    InactiveAccount,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Successful login: the signed token plus the account it belongs to.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: users::Model,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the email is unknown or
    /// the password does not match, and [`AuthError::InactiveAccount`] when
    /// the account exists but has been deactivated.
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Resolves a bearer token back to the account it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for missing, malformed or expired
    /// tokens, and for tokens whose subject no longer exists.
    async fn resolve(&self, token: &str) -> Result<users::Model, AuthError>;
}
