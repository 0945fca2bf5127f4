use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::ResourceStatus;
use crate::entities::{prelude::*, strategic_resources};

pub struct NewResource {
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub arrival_date: NaiveDate,
    pub destination: Option<String>,
    pub supplier: Option<String>,
    pub value: Option<Decimal>,
    pub status: ResourceStatus,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Default)]
pub struct ResourceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub arrival_date: Option<NaiveDate>,
    pub destination: Option<String>,
    pub supplier: Option<String>,
    pub value: Option<Decimal>,
    pub status: Option<ResourceStatus>,
}

pub struct StrategicRepository {
    conn: DatabaseConnection,
}

impl StrategicRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, data: NewResource) -> Result<strategic_resources::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = strategic_resources::ActiveModel {
            name: Set(data.name),
            description: Set(data.description),
            quantity: Set(data.quantity),
            arrival_date: Set(data.arrival_date),
            destination: Set(data.destination),
            supplier: Set(data.supplier),
            value: Set(data.value),
            status: Set(data.status.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert strategic resource")
    }

    pub async fn get(&self, id: i32) -> Result<Option<strategic_resources::Model>> {
        StrategicResources::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query strategic resource")
    }

    /// Most recent arrivals first.
    pub async fn list(&self) -> Result<Vec<strategic_resources::Model>> {
        StrategicResources::find()
            .order_by_desc(strategic_resources::Column::ArrivalDate)
            .all(&self.conn)
            .await
            .context("Failed to list strategic resources")
    }

    pub async fn update(
        &self,
        id: i32,
        changes: ResourceChanges,
    ) -> Result<Option<strategic_resources::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: strategic_resources::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(arrival_date) = changes.arrival_date {
            active.arrival_date = Set(arrival_date);
        }
        if let Some(destination) = changes.destination {
            active.destination = Set(Some(destination));
        }
        if let Some(supplier) = changes.supplier {
            active.supplier = Set(Some(supplier));
        }
        if let Some(value) = changes.value {
            active.value = Set(Some(value));
        }
        if let Some(status) = changes.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update strategic resource")?;
        Ok(Some(updated))
    }
}
