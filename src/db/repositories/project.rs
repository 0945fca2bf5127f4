use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{self, ProjectStatus};
use crate::entities::{prelude::*, projects};

pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub progress: i32,
    pub funds_applied: Decimal,
    pub funds_pending: Decimal,
    pub notes: Option<String>,
    pub secretariat_id: i32,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub actual_end_date: Option<NaiveDate>,
    pub progress: Option<i32>,
    pub funds_applied: Option<Decimal>,
    pub funds_pending: Option<Decimal>,
    pub notes: Option<String>,
}

pub struct ProjectRepository {
    conn: DatabaseConnection,
}

impl ProjectRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, data: NewProject) -> Result<projects::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = projects::ActiveModel {
            title: Set(data.title),
            description: Set(data.description),
            status: Set(data.status.as_str().to_string()),
            start_date: Set(data.start_date),
            planned_end_date: Set(data.planned_end_date),
            actual_end_date: Set(None),
            progress: Set(data.progress),
            funds_applied: Set(data.funds_applied),
            funds_pending: Set(data.funds_pending),
            notes: Set(data.notes),
            secretariat_id: Set(data.secretariat_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert project")
    }

    pub async fn get(&self, id: i32) -> Result<Option<projects::Model>> {
        Projects::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query project")
    }

    pub async fn list(
        &self,
        secretariat_id: Option<i32>,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<projects::Model>> {
        let mut query = Projects::find();

        if let Some(secretariat_id) = secretariat_id {
            query = query.filter(projects::Column::SecretariatId.eq(secretariat_id));
        }
        if let Some(status) = status {
            query = query.filter(projects::Column::Status.eq(status.as_str()));
        }

        query.all(&self.conn).await.context("Failed to list projects")
    }

    /// Merge `changes` into the stored row, then run the completion rule:
    /// progress at 100 forces "completed" and stamps the actual end date
    /// exactly once. The rule runs on every update, never in reverse.
    pub async fn update(
        &self,
        id: i32,
        changes: ProjectChanges,
    ) -> Result<Option<projects::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let progress = changes
            .progress
            .map_or(existing.progress, domain::clamp_progress);
        let status = changes
            .status
            .or_else(|| ProjectStatus::parse(&existing.status))
            .unwrap_or(ProjectStatus::Planning);
        let actual_end_date = changes.actual_end_date.or(existing.actual_end_date);

        let today = chrono::Utc::now().date_naive();
        let completion = domain::completion_rule(progress, status, actual_end_date, today);

        let mut active: projects::ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(start_date) = changes.start_date {
            active.start_date = Set(Some(start_date));
        }
        if let Some(planned_end_date) = changes.planned_end_date {
            active.planned_end_date = Set(Some(planned_end_date));
        }
        if let Some(funds_applied) = changes.funds_applied {
            active.funds_applied = Set(funds_applied);
        }
        if let Some(funds_pending) = changes.funds_pending {
            active.funds_pending = Set(funds_pending);
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        active.progress = Set(progress);
        active.status = Set(completion.status.as_str().to_string());
        active.actual_end_date = Set(completion.actual_end_date);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update project")?;
        Ok(Some(updated))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Projects::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete project")?;
        Ok(result.rows_affected > 0)
    }
}
