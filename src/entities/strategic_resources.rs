use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "strategic_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub quantity: i32,

    pub arrival_date: Date,

    /// Where the resource is intended to be used.
    pub destination: Option<String>,

    pub supplier: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub value: Option<Decimal>,

    /// One of "received", "in_use", "finalized"
    pub status: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
