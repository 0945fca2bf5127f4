use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use super::auth::{CurrentUser, require};
use super::{ApiError, ApiResponse, AppState, MessageResponse, ProjectDto, validation};
use crate::db::{NewProject, ProjectChanges};
use crate::domain::{self, Action, ProjectStatus};
use crate::reports::{self, dashboard::ProjectDashboard};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub planned_end_date: Option<String>,
    pub progress: Option<i32>,
    pub funds_applied: Option<Decimal>,
    pub funds_pending: Option<Decimal>,
    pub notes: Option<String>,
    pub secretariat_id: i32,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub planned_end_date: Option<String>,
    pub actual_end_date: Option<String>,
    pub progress: Option<i32>,
    pub funds_applied: Option<Decimal>,
    pub funds_pending: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub secretariat_id: Option<i32>,
    pub status: Option<String>,
}

fn parse_status(value: &str) -> Result<ProjectStatus, ApiError> {
    ProjectStatus::parse(value)
        .ok_or_else(|| ApiError::validation(format!("Invalid project status '{value}'")))
}

/// GET /projects
/// All projects, optionally narrowed by secretariat and/or status.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectDto>>>, ApiError> {
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let projects = state
        .store
        .list_projects(query.secretariat_id, status)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(
        projects
            .into_iter()
            .map(|p| ProjectDto::from_model(p, today))
            .collect(),
    )))
}

/// POST /projects
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectDto>>, ApiError> {
    require(&user, Action::Write)?;

    validation::validate_required(&payload.title, "Title")?;
    validation::validate_id(payload.secretariat_id)?;

    let status = payload
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or(ProjectStatus::Planning);

    let start_date = payload
        .start_date
        .as_deref()
        .map(|d| validation::parse_date(d, "start date"))
        .transpose()?;
    let planned_end_date = payload
        .planned_end_date
        .as_deref()
        .map(|d| validation::parse_date(d, "planned end date"))
        .transpose()?;

    let funds_applied = payload.funds_applied.unwrap_or(Decimal::ZERO);
    let funds_pending = payload.funds_pending.unwrap_or(Decimal::ZERO);
    validation::validate_non_negative(funds_applied, "Funds applied")?;
    validation::validate_non_negative(funds_pending, "Funds pending")?;

    // The owning secretariat must exist; the FK alone would surface this as
    // an opaque database error.
    state
        .store
        .get_secretariat(payload.secretariat_id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Secretariat", payload.secretariat_id))?;

    let created = state
        .store
        .create_project(NewProject {
            title: payload.title,
            description: payload.description,
            status,
            start_date,
            planned_end_date,
            progress: domain::clamp_progress(payload.progress.unwrap_or(0)),
            funds_applied,
            funds_pending,
            notes: payload.notes,
            secretariat_id: payload.secretariat_id,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(ProjectDto::from_model(
        created, today,
    ))))
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProjectDto>>, ApiError> {
    let id = validation::validate_id(id)?;

    let model = state
        .store
        .get_project(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(ProjectDto::from_model(
        model, today,
    ))))
}

/// PUT /projects/{id}
/// Partial update; progress reaching 100 flips the project to completed and
/// stamps the actual end date (see the repository's completion rule).
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectDto>>, ApiError> {
    require(&user, Action::Write)?;
    let id = validation::validate_id(id)?;

    if let Some(title) = &payload.title {
        validation::validate_required(title, "Title")?;
    }
    if let Some(funds_applied) = payload.funds_applied {
        validation::validate_non_negative(funds_applied, "Funds applied")?;
    }
    if let Some(funds_pending) = payload.funds_pending {
        validation::validate_non_negative(funds_pending, "Funds pending")?;
    }

    let changes = ProjectChanges {
        title: payload.title,
        description: payload.description,
        status: payload.status.as_deref().map(parse_status).transpose()?,
        start_date: payload
            .start_date
            .as_deref()
            .map(|d| validation::parse_date(d, "start date"))
            .transpose()?,
        planned_end_date: payload
            .planned_end_date
            .as_deref()
            .map(|d| validation::parse_date(d, "planned end date"))
            .transpose()?,
        actual_end_date: payload
            .actual_end_date
            .as_deref()
            .map(|d| validation::parse_date(d, "actual end date"))
            .transpose()?,
        progress: payload.progress,
        funds_applied: payload.funds_applied,
        funds_pending: payload.funds_pending,
        notes: payload.notes,
    };

    let updated = state
        .store
        .update_project(id, changes)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(ProjectDto::from_model(
        updated, today,
    ))))
}

/// DELETE /projects/{id}
/// Hard delete. Administrators only.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require(&user, Action::DeleteProject)?;
    let id = validation::validate_id(id)?;

    let removed = state
        .store
        .remove_project(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    if !removed {
        return Err(ApiError::not_found("Project", id));
    }

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Project deleted",
    ))))
}

/// GET /projects/dashboard
/// Project-centric dashboard: status totals, per-secretariat counts and the
/// list of projects approaching their planned end.
pub async fn project_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ProjectDashboard>>, ApiError> {
    let secretariats = state
        .store
        .list_secretariats()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    let projects = state
        .store
        .list_projects(None, None)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(reports::dashboard::project_dashboard(
        &secretariats,
        &projects,
        today,
    ))))
}
