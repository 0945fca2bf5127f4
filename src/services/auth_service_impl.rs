use crate::db::Store;
use crate::db::repositories::user::verify_password;
use crate::entities::users;

use super::auth_service::{AuthError, AuthService, AuthenticatedUser};
use super::token::TokenService;

/// [`AuthService`] backed by the sea-orm store and the JWT token service.
pub struct SeaOrmAuthService {
    store: Store,
    tokens: TokenService,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, tokens: TokenService) -> Self {
        Self { store, tokens }
    }
}

#[async_trait::async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid =
            verify_password(user.password_hash.clone(), password.to_string()).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.active {
            return Err(AuthError::InactiveAccount);
        }

        let token = self
            .tokens
            .issue(user.id, &user.access_level)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(AuthenticatedUser { token, user })
    }

    async fn resolve(&self, token: &str) -> Result<users::Model, AuthError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;

        self.store
            .get_user(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
