use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ProjectStatus, deadline};
use crate::entities::{office_materials, projects, secretariats, users};
use crate::reports::government::material_total;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub access_level: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for UserDto {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            access_level: model.access_level,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SecretariatDto {
    pub id: i32,
    pub name: String,
    pub responsible: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub total_projects: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl SecretariatDto {
    #[must_use]
    pub fn from_model(model: secretariats::Model, total_projects: usize) -> Self {
        Self {
            id: model.id,
            name: model.name,
            responsible: model.responsible,
            contact: model.contact,
            email: model.email,
            phone: model.phone,
            active: model.active,
            total_projects,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub progress: i32,
    pub funds_applied: Decimal,
    pub funds_pending: Decimal,
    pub notes: Option<String>,
    pub secretariat_id: i32,
    /// Days until the planned end; negative when past due.
    pub days_remaining: Option<i64>,
    pub overdue: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectDto {
    #[must_use]
    pub fn from_model(model: projects::Model, today: NaiveDate) -> Self {
        let status = ProjectStatus::parse(&model.status).unwrap_or(ProjectStatus::Planning);
        Self {
            days_remaining: deadline::days_remaining(model.planned_end_date, today),
            overdue: deadline::is_overdue(status, model.planned_end_date, today),
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            start_date: model.start_date,
            planned_end_date: model.planned_end_date,
            actual_end_date: model.actual_end_date,
            progress: model.progress,
            funds_applied: model.funds_applied,
            funds_pending: model.funds_pending,
            notes: model.notes,
            secretariat_id: model.secretariat_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MaterialDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub entry_date: NaiveDate,
    pub unit_price: Option<Decimal>,
    /// unit price x quantity; zero when no price is recorded.
    pub total_price: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<office_materials::Model> for MaterialDto {
    fn from(model: office_materials::Model) -> Self {
        Self {
            total_price: material_total(&model),
            id: model.id,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            unit: model.unit,
            supplier: model.supplier,
            entry_date: model.entry_date,
            unit_price: model.unit_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Optional inclusive reporting window, as it arrives on the query string.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub period_start: Option<String>,
    pub period_end: Option<String>,
}

/// Echo of the window a report was computed over.
#[derive(Debug, Serialize)]
pub struct PeriodEcho {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
