use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// One of "planning", "in_execution", "completed", "delayed"
    pub status: String,

    pub start_date: Option<Date>,

    pub planned_end_date: Option<Date>,

    /// Set automatically the first time progress reaches 100.
    pub actual_end_date: Option<Date>,

    /// 0 to 100
    pub progress: i32,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub funds_applied: Decimal,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub funds_pending: Decimal,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub secretariat_id: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::secretariats::Entity",
        from = "Column::SecretariatId",
        to = "super::secretariats::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Secretariat,
}

impl Related<super::secretariats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Secretariat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
