use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub branch_id: i64,
    pub branch_name: String,
    pub cost_center_id: i64,
    pub cost_center_name: String,
    pub status: RecordStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contract_unit::Entity")]
    Units,
}

impl Related<super::contract_unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
