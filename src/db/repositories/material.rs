use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{office_materials, prelude::*};

pub struct NewMaterial {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub entry_date: NaiveDate,
    pub unit_price: Option<Decimal>,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Default)]
pub struct MaterialChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub unit_price: Option<Decimal>,
}

pub struct MaterialRepository {
    conn: DatabaseConnection,
}

impl MaterialRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, data: NewMaterial) -> Result<office_materials::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = office_materials::ActiveModel {
            name: Set(data.name),
            description: Set(data.description),
            quantity: Set(data.quantity),
            unit: Set(data.unit),
            supplier: Set(data.supplier),
            entry_date: Set(data.entry_date),
            unit_price: Set(data.unit_price),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert material")
    }

    pub async fn get(&self, id: i32) -> Result<Option<office_materials::Model>> {
        OfficeMaterials::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query material")
    }

    /// Most recent arrivals first.
    pub async fn list(&self) -> Result<Vec<office_materials::Model>> {
        OfficeMaterials::find()
            .order_by_desc(office_materials::Column::EntryDate)
            .all(&self.conn)
            .await
            .context("Failed to list materials")
    }

    pub async fn update(
        &self,
        id: i32,
        changes: MaterialChanges,
    ) -> Result<Option<office_materials::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: office_materials::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(unit) = changes.unit {
            active.unit = Set(Some(unit));
        }
        if let Some(supplier) = changes.supplier {
            active.supplier = Set(Some(supplier));
        }
        if let Some(entry_date) = changes.entry_date {
            active.entry_date = Set(entry_date);
        }
        if let Some(unit_price) = changes.unit_price {
            active.unit_price = Set(Some(unit_price));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update material")?;
        Ok(Some(updated))
    }
}
