use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::{CurrentUser, require};
use super::{ApiError, ApiResponse, AppState, MessageResponse, SecretariatDto, validation};
use crate::db::{NewSecretariat, SecretariatChanges};
use crate::domain::Action;

#[derive(Debug, Deserialize)]
pub struct CreateSecretariatRequest {
    pub name: String,
    pub responsible: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateSecretariatRequest {
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// GET /secretariats
/// Active secretariats with their project counts.
pub async fn list_secretariats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SecretariatDto>>>, ApiError> {
    let rows = state
        .store
        .list_active_secretariats_with_counts()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let dtos = rows
        .into_iter()
        .map(|(model, count)| SecretariatDto::from_model(model, count))
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// POST /secretariats
pub async fn create_secretariat(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Json(payload): Json<CreateSecretariatRequest>,
) -> Result<Json<ApiResponse<SecretariatDto>>, ApiError> {
    require(&user, Action::Write)?;

    validation::validate_required(&payload.name, "Name")?;
    validation::validate_required(&payload.responsible, "Responsible")?;

    let created = state
        .store
        .create_secretariat(NewSecretariat {
            name: payload.name,
            responsible: payload.responsible,
            contact: payload.contact,
            email: payload.email,
            phone: payload.phone,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(SecretariatDto::from_model(
        created, 0,
    ))))
}

/// GET /secretariats/{id}
pub async fn get_secretariat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SecretariatDto>>, ApiError> {
    let id = validation::validate_id(id)?;

    let model = state
        .store
        .get_secretariat(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Secretariat", id))?;

    let total_projects = state
        .store
        .list_projects(Some(id), None)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .len();

    Ok(Json(ApiResponse::success(SecretariatDto::from_model(
        model,
        total_projects,
    ))))
}

/// PUT /secretariats/{id}
pub async fn update_secretariat(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSecretariatRequest>,
) -> Result<Json<ApiResponse<SecretariatDto>>, ApiError> {
    require(&user, Action::Write)?;
    let id = validation::validate_id(id)?;

    if let Some(name) = &payload.name {
        validation::validate_required(name, "Name")?;
    }
    if let Some(responsible) = &payload.responsible {
        validation::validate_required(responsible, "Responsible")?;
    }

    let updated = state
        .store
        .update_secretariat(
            id,
            SecretariatChanges {
                name: payload.name,
                responsible: payload.responsible,
                contact: payload.contact,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Secretariat", id))?;

    let total_projects = state
        .store
        .list_projects(Some(id), None)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .len();

    Ok(Json(ApiResponse::success(SecretariatDto::from_model(
        updated,
        total_projects,
    ))))
}

/// DELETE /secretariats/{id}
/// Soft delete: the secretariat is deactivated, not removed, so its history
/// and projects stay queryable. Administrators only.
pub async fn deactivate_secretariat(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require(&user, Action::DeactivateSecretariat)?;
    let id = validation::validate_id(id)?;

    let deactivated = state
        .store
        .deactivate_secretariat(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    if !deactivated {
        return Err(ApiError::not_found("Secretariat", id));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Secretariat deactivated",
    ))))
}
