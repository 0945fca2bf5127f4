use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{paid_bills, prelude::*};

pub struct NewBill {
    pub category: String,
    pub reference_month: String,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub receipt_file: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Default)]
pub struct BillChanges {
    pub category: Option<String>,
    pub reference_month: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub receipt_file: Option<String>,
    pub notes: Option<String>,
}

/// Optional equality/prefix filters for bill listings.
#[derive(Default)]
pub struct BillFilter {
    pub category: Option<String>,
    pub reference_month: Option<String>,
    /// Matches any reference month within the year ("2026-%").
    pub year: Option<String>,
}

pub struct BillRepository {
    conn: DatabaseConnection,
}

impl BillRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, data: NewBill) -> Result<paid_bills::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let active = paid_bills::ActiveModel {
            category: Set(data.category),
            reference_month: Set(data.reference_month),
            amount: Set(data.amount),
            payment_date: Set(data.payment_date),
            receipt_file: Set(data.receipt_file),
            notes: Set(data.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert bill")
    }

    pub async fn get(&self, id: i32) -> Result<Option<paid_bills::Model>> {
        PaidBills::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query bill")
    }

    /// Newest billing period first.
    pub async fn list(&self, filter: BillFilter) -> Result<Vec<paid_bills::Model>> {
        let mut query =
            PaidBills::find().order_by_desc(paid_bills::Column::ReferenceMonth);

        if let Some(category) = filter.category {
            query = query.filter(paid_bills::Column::Category.eq(category));
        }
        if let Some(month) = filter.reference_month {
            query = query.filter(paid_bills::Column::ReferenceMonth.eq(month));
        }
        if let Some(year) = filter.year {
            query = query.filter(paid_bills::Column::ReferenceMonth.like(format!("{year}-%")));
        }

        query.all(&self.conn).await.context("Failed to list bills")
    }

    pub async fn update(&self, id: i32, changes: BillChanges) -> Result<Option<paid_bills::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: paid_bills::ActiveModel = existing.into();
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(reference_month) = changes.reference_month {
            active.reference_month = Set(reference_month);
        }
        if let Some(amount) = changes.amount {
            active.amount = Set(amount);
        }
        if let Some(payment_date) = changes.payment_date {
            active.payment_date = Set(payment_date);
        }
        if let Some(receipt_file) = changes.receipt_file {
            active.receipt_file = Set(Some(receipt_file));
        }
        if let Some(notes) = changes.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update bill")?;
        Ok(Some(updated))
    }
}
