//! Report endpoints: thin fetch-then-compute glue. The store supplies full
//! row sets; the reports engine does the math.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PeriodEcho, PeriodQuery, validation};
use crate::db::BillFilter;
use crate::reports::{self, Dashboard, DateRange, GovernmentSummary, SecretariatReport};

#[derive(Debug, Deserialize)]
pub struct SecretariatReportQuery {
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub secretariat_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SecretariatReportResponse {
    pub reports: Vec<SecretariatReport>,
    pub period: PeriodEcho,
}

#[derive(Debug, Serialize)]
pub struct GovernmentReportResponse {
    pub summary: GovernmentSummary,
    pub period: PeriodEcho,
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, ApiError> {
    Ok(DateRange::new(
        validation::parse_date_opt(start, "period_start")?,
        validation::parse_date_opt(end, "period_end")?,
    ))
}

/// GET /reports/secretariats
/// One report per active secretariat, optionally narrowed to a single one
/// and to projects started within the period.
pub async fn secretariat_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SecretariatReportQuery>,
) -> Result<Json<ApiResponse<SecretariatReportResponse>>, ApiError> {
    let range = parse_range(query.period_start.as_deref(), query.period_end.as_deref())?;

    let mut secretariats = state
        .store
        .list_secretariats()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    if let Some(id) = query.secretariat_id {
        secretariats.retain(|s| s.id == id);
    }

    let projects = state
        .store
        .list_projects(query.secretariat_id, None)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let reports = reports::secretariat_reports(&secretariats, &projects, &range);

    Ok(Json(ApiResponse::success(SecretariatReportResponse {
        reports,
        period: PeriodEcho {
            start: range.start,
            end: range.end,
        },
    })))
}

/// GET /reports/government
/// Spending across the three ledgers for the optional period.
pub async fn government_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<GovernmentReportResponse>>, ApiError> {
    let range = parse_range(query.period_start.as_deref(), query.period_end.as_deref())?;

    let bills = state
        .store
        .list_bills(BillFilter::default())
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    let materials = state
        .store
        .list_materials()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    let resources = state
        .store
        .list_resources()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let summary = reports::government_summary(&bills, &materials, &resources, &range);

    Ok(Json(ApiResponse::success(GovernmentReportResponse {
        summary,
        period: PeriodEcho {
            start: range.start,
            end: range.end,
        },
    })))
}

/// GET /reports/dashboard
/// The headline dashboard: counts, rates, breakdowns and alerts.
pub async fn general_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
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
    let bills = state
        .store
        .list_bills(BillFilter::default())
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;
    let materials = state
        .store
        .list_materials()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    let today = chrono::Utc::now().date_naive();
    let dashboard = reports::build_dashboard(&secretariats, &projects, &bills, &materials, today);

    Ok(Json(ApiResponse::success(dashboard)))
}
