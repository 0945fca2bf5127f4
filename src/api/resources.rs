//! Handlers for the three resource ledgers: paid bills, office materials
//! and strategic resources.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use super::auth::{CurrentUser, require};
use super::{ApiError, ApiResponse, AppState, MaterialDto, validation};
use crate::db::{
    BillChanges, BillFilter, MaterialChanges, NewBill, NewMaterial, NewResource, ResourceChanges,
};
use crate::domain::{Action, ResourceStatus};
use crate::entities::{paid_bills, strategic_resources};
use crate::reports::{self, ResourceDashboard};

// ============================================================================
// Paid bills
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub category: String,
    pub reference_month: String,
    pub amount: Decimal,
    pub payment_date: String,
    pub receipt_file: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateBillRequest {
    pub category: Option<String>,
    pub reference_month: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<String>,
    pub receipt_file: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    pub category: Option<String>,
    pub reference_month: Option<String>,
    pub year: Option<String>,
}

/// GET /resources/bills
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BillListQuery>,
) -> Result<Json<ApiResponse<Vec<paid_bills::Model>>>, ApiError> {
    let bills = state
        .store
        .list_bills(BillFilter {
            category: query.category,
            reference_month: query.reference_month,
            year: query.year,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(bills)))
}

/// POST /resources/bills
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Json(payload): Json<CreateBillRequest>,
) -> Result<Json<ApiResponse<paid_bills::Model>>, ApiError> {
    require(&user, Action::Write)?;

    validation::validate_required(&payload.category, "Category")?;
    validation::validate_reference_month(&payload.reference_month)?;
    validation::validate_non_negative(payload.amount, "Amount")?;
    let payment_date = validation::parse_date(&payload.payment_date, "payment date")?;

    let created = state
        .store
        .create_bill(NewBill {
            category: payload.category,
            reference_month: payload.reference_month,
            amount: payload.amount,
            payment_date,
            receipt_file: payload.receipt_file,
            notes: payload.notes,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(created)))
}

/// GET /resources/bills/{id}
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<paid_bills::Model>>, ApiError> {
    let id = validation::validate_id(id)?;

    let bill = state
        .store
        .get_bill(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Bill", id))?;

    Ok(Json(ApiResponse::success(bill)))
}

/// PUT /resources/bills/{id}
pub async fn update_bill(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBillRequest>,
) -> Result<Json<ApiResponse<paid_bills::Model>>, ApiError> {
    require(&user, Action::Write)?;
    let id = validation::validate_id(id)?;

    if let Some(month) = &payload.reference_month {
        validation::validate_reference_month(month)?;
    }
    if let Some(amount) = payload.amount {
        validation::validate_non_negative(amount, "Amount")?;
    }
    let payment_date = payload
        .payment_date
        .as_deref()
        .map(|d| validation::parse_date(d, "payment date"))
        .transpose()?;

    let updated = state
        .store
        .update_bill(
            id,
            BillChanges {
                category: payload.category,
                reference_month: payload.reference_month,
                amount: payload.amount,
                payment_date,
                receipt_file: payload.receipt_file,
                notes: payload.notes,
            },
        )
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Bill", id))?;

    Ok(Json(ApiResponse::success(updated)))
}

// ============================================================================
// Office materials
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateMaterialRequest {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub entry_date: String,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMaterialRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub entry_date: Option<String>,
    pub unit_price: Option<Decimal>,
}

/// GET /resources/materials
pub async fn list_materials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MaterialDto>>>, ApiError> {
    let materials = state
        .store
        .list_materials()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        materials.into_iter().map(MaterialDto::from).collect(),
    )))
}

/// POST /resources/materials
pub async fn create_material(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Json(payload): Json<CreateMaterialRequest>,
) -> Result<Json<ApiResponse<MaterialDto>>, ApiError> {
    require(&user, Action::Write)?;

    validation::validate_required(&payload.name, "Name")?;
    if payload.quantity < 0 {
        return Err(ApiError::validation("Quantity cannot be negative"));
    }
    if let Some(price) = payload.unit_price {
        validation::validate_non_negative(price, "Unit price")?;
    }
    let entry_date = validation::parse_date(&payload.entry_date, "entry date")?;

    let created = state
        .store
        .create_material(NewMaterial {
            name: payload.name,
            description: payload.description,
            quantity: payload.quantity,
            unit: payload.unit,
            supplier: payload.supplier,
            entry_date,
            unit_price: payload.unit_price,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(created.into())))
}

/// GET /resources/materials/{id}
pub async fn get_material(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MaterialDto>>, ApiError> {
    let id = validation::validate_id(id)?;

    let material = state
        .store
        .get_material(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Material", id))?;

    Ok(Json(ApiResponse::success(material.into())))
}

/// PUT /resources/materials/{id}
pub async fn update_material(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMaterialRequest>,
) -> Result<Json<ApiResponse<MaterialDto>>, ApiError> {
    require(&user, Action::Write)?;
    let id = validation::validate_id(id)?;

    if let Some(quantity) = payload.quantity
        && quantity < 0
    {
        return Err(ApiError::validation("Quantity cannot be negative"));
    }
    if let Some(price) = payload.unit_price {
        validation::validate_non_negative(price, "Unit price")?;
    }
    let entry_date = payload
        .entry_date
        .as_deref()
        .map(|d| validation::parse_date(d, "entry date"))
        .transpose()?;

    let updated = state
        .store
        .update_material(
            id,
            MaterialChanges {
                name: payload.name,
                description: payload.description,
                quantity: payload.quantity,
                unit: payload.unit,
                supplier: payload.supplier,
                entry_date,
                unit_price: payload.unit_price,
            },
        )
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Material", id))?;

    Ok(Json(ApiResponse::success(updated.into())))
}

// ============================================================================
// Strategic resources
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub arrival_date: String,
    pub destination: Option<String>,
    pub supplier: Option<String>,
    pub value: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateResourceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub arrival_date: Option<String>,
    pub destination: Option<String>,
    pub supplier: Option<String>,
    pub value: Option<Decimal>,
    pub status: Option<String>,
}

fn parse_resource_status(value: &str) -> Result<ResourceStatus, ApiError> {
    ResourceStatus::parse(value)
        .ok_or_else(|| ApiError::validation(format!("Invalid resource status '{value}'")))
}

/// GET /resources/strategic
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<strategic_resources::Model>>>, ApiError> {
    let resources = state
        .store
        .list_resources()
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(resources)))
}

/// POST /resources/strategic
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Json(payload): Json<CreateResourceRequest>,
) -> Result<Json<ApiResponse<strategic_resources::Model>>, ApiError> {
    require(&user, Action::Write)?;

    validation::validate_required(&payload.name, "Name")?;
    validation::validate_required(&payload.description, "Description")?;
    if payload.quantity < 0 {
        return Err(ApiError::validation("Quantity cannot be negative"));
    }
    if let Some(value) = payload.value {
        validation::validate_non_negative(value, "Value")?;
    }
    let arrival_date = validation::parse_date(&payload.arrival_date, "arrival date")?;
    let status = payload
        .status
        .as_deref()
        .map(parse_resource_status)
        .transpose()?
        .unwrap_or(ResourceStatus::Received);

    let created = state
        .store
        .create_resource(NewResource {
            name: payload.name,
            description: payload.description,
            quantity: payload.quantity,
            arrival_date,
            destination: payload.destination,
            supplier: payload.supplier,
            value: payload.value,
            status,
        })
        .await
        .map_err(|e| ApiError::database(e.to_string()))?;

    Ok(Json(ApiResponse::success(created)))
}

/// GET /resources/strategic/{id}
pub async fn get_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<strategic_resources::Model>>, ApiError> {
    let id = validation::validate_id(id)?;

    let resource = state
        .store
        .get_resource(id)
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Strategic resource", id))?;

    Ok(Json(ApiResponse::success(resource)))
}

/// PUT /resources/strategic/{id}
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    user: Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateResourceRequest>,
) -> Result<Json<ApiResponse<strategic_resources::Model>>, ApiError> {
    require(&user, Action::Write)?;
    let id = validation::validate_id(id)?;

    if let Some(quantity) = payload.quantity
        && quantity < 0
    {
        return Err(ApiError::validation("Quantity cannot be negative"));
    }
    if let Some(value) = payload.value {
        validation::validate_non_negative(value, "Value")?;
    }
    let arrival_date = payload
        .arrival_date
        .as_deref()
        .map(|d| validation::parse_date(d, "arrival date"))
        .transpose()?;

    let updated = state
        .store
        .update_resource(
            id,
            ResourceChanges {
                name: payload.name,
                description: payload.description,
                quantity: payload.quantity,
                arrival_date,
                destination: payload.destination,
                supplier: payload.supplier,
                value: payload.value,
                status: payload
                    .status
                    .as_deref()
                    .map(parse_resource_status)
                    .transpose()?,
            },
        )
        .await
        .map_err(|e| ApiError::database(e.to_string()))?
        .ok_or_else(|| ApiError::not_found("Strategic resource", id))?;

    Ok(Json(ApiResponse::success(updated)))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /resources/dashboard
/// Current-year category spend, this month's total, recent material intake
/// and strategic resources by status.
pub async fn resource_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ResourceDashboard>>, ApiError> {
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

    let today = chrono::Utc::now().date_naive();
    Ok(Json(ApiResponse::success(reports::resource_dashboard(
        &bills, &materials, &resources, today,
    ))))
}
