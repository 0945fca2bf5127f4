use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "paid_bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Free-text category (electricity, water, internet, ...)
    pub category: String,

    /// Billing period in YYYY-MM format, independent of the payment date.
    pub reference_month: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    pub payment_date: Date,

    /// Path to the stored receipt scan, when one was uploaded.
    pub receipt_file: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
