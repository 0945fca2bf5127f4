use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "office_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub quantity: i32,

    /// Unit of measure (unit, box, pack, ...)
    pub unit: Option<String>,

    pub supplier: Option<String>,

    pub entry_date: Date,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub unit_price: Option<Decimal>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
