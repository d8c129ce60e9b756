use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub status: RecordStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::unit_period::Entity")]
    UnitLinks,
}

impl Related<super::unit_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
