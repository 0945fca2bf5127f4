use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UserDto, validation};
use crate::db::NewUser;
use crate::domain::{self, AccessLevel, Action};
use crate::entities::users;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub access_level: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// The resolved caller, injected into request extensions by the middleware.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub name: String,
    pub level: AccessLevel,
    pub active: bool,
}

impl CurrentUser {
    fn from_model(user: &users::Model) -> Result<Self, ApiError> {
        let level = AccessLevel::parse(&user.access_level).ok_or_else(|| {
            ApiError::internal(format!(
                "User {} has unknown access level '{}'",
                user.id, user.access_level
            ))
        })?;

        Ok(Self {
            id: user.id,
            name: user.name.clone(),
            level,
            active: user.active,
        })
    }

    const fn actor(&self) -> domain::Actor {
        domain::Actor {
            id: self.id,
            level: self.level,
            active: self.active,
        }
    }
}

/// Deny unless the policy allows `action` for this caller.
pub fn require(user: &CurrentUser, action: Action) -> Result<(), ApiError> {
    if domain::permit(&user.actor(), action) {
        Ok(())
    } else {
        Err(ApiError::AccessDenied)
    }
}

/// Authentication middleware: resolves the `Authorization: Bearer` token to
/// a user account and stashes it in request extensions. Authorization (who
/// may do what) happens per-handler via [`require`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user = state.auth.resolve(&token).await?;
    let current = CurrentUser::from_model(&user)?;

    tracing::Span::current().record("user_id", current.id);
    request.extensions_mut().insert(current);

    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(token.trim().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with email and password, returns a bearer token on success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    validation::validate_required(&payload.email, "Email")?;
    validation::validate_required(&payload.password, "Password")?;

    let authenticated = state.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: authenticated.token,
        user: authenticated.user.into(),
    })))
}

/// POST /auth/register
/// Create a new user account (administrators only).
pub async fn register(
    State(state): State<Arc<AppState>>,
    user: axum::Extension<CurrentUser>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require(&user, Action::ManageUsers)?;

    validation::validate_required(&payload.name, "Name")?;
    validation::validate_email(&payload.email)?;
    validation::validate_required(&payload.password, "Password")?;
    let level = AccessLevel::parse(&payload.access_level).ok_or_else(|| {
        ApiError::validation(format!("Invalid access level '{}'", payload.access_level))
    })?;

    let existing = state
        .store
        .get_user_by_email(&payload.email)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    if existing.is_some() {
        return Err(ApiError::Conflict(format!(
            "Email {} is already registered",
            payload.email
        )));
    }

    let security = state.config.read().await.security.clone();
    let created = state
        .store
        .create_user(
            NewUser {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                access_level: level.as_str().to_string(),
            },
            &security,
        )
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    tracing::info!(user_id = created.id, "User registered");

    Ok(Json(ApiResponse::success(created.into())))
}

/// GET /auth/me
/// The account behind the presented token.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    user: axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let model = state
        .store
        .get_user(user.id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("User", user.id))?;

    Ok(Json(ApiResponse::success(model.into())))
}

/// GET /auth/users
/// List all accounts (administrators only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    user: axum::Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    require(&user, Action::ManageUsers)?;

    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}
