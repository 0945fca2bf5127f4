use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, Set,
};

use crate::entities::{prelude::*, secretariats};

pub struct NewSecretariat {
    pub name: String,
    pub responsible: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Default)]
pub struct SecretariatChanges {
    pub name: Option<String>,
    pub responsible: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct SecretariatRepository {
    conn: DatabaseConnection,
}

impl SecretariatRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, data: NewSecretariat) -> Result<secretariats::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = secretariats::ActiveModel {
            name: Set(data.name),
            responsible: Set(data.responsible),
            contact: Set(data.contact),
            email: Set(data.email),
            phone: Set(data.phone),
            active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert secretariat")
    }

    pub async fn get(&self, id: i32) -> Result<Option<secretariats::Model>> {
        Secretariats::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query secretariat")
    }

    pub async fn list_all(&self) -> Result<Vec<secretariats::Model>> {
        Secretariats::find()
            .all(&self.conn)
            .await
            .context("Failed to list secretariats")
    }

    /// Active secretariats with the number of projects each one owns.
    pub async fn list_active_with_counts(&self) -> Result<Vec<(secretariats::Model, usize)>> {
        let secretariats = Secretariats::find()
            .filter(secretariats::Column::Active.eq(true))
            .all(&self.conn)
            .await
            .context("Failed to list secretariats")?;

        let projects = secretariats
            .load_many(Projects, &self.conn)
            .await
            .context("Failed to load project counts")?;

        Ok(secretariats
            .into_iter()
            .zip(projects.into_iter().map(|p| p.len()))
            .collect())
    }

    pub async fn update(
        &self,
        id: i32,
        changes: SecretariatChanges,
    ) -> Result<Option<secretariats::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: secretariats::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(responsible) = changes.responsible {
            active.responsible = Set(responsible);
        }
        if let Some(contact) = changes.contact {
            active.contact = Set(Some(contact));
        }
        if let Some(email) = changes.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(Some(phone));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update secretariat")?;
        Ok(Some(updated))
    }

    /// Soft delete: clears the active flag, keeping the row and its projects.
    pub async fn deactivate(&self, id: i32) -> Result<bool> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: secretariats::ActiveModel = existing.into();
        active.active = Set(false);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active
            .update(&self.conn)
            .await
            .context("Failed to deactivate secretariat")?;
        Ok(true)
    }

    /// Hard removal. The projects FK declares ON DELETE CASCADE, so the
    /// secretariat's projects disappear with it.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Secretariats::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete secretariat")?;
        Ok(result.rows_affected > 0)
    }
}
