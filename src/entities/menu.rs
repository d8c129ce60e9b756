use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::status::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub reference_month: i32,
    pub reference_year: i32,
    pub week_count: i32,
    pub status: RecordStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_plan_entry::Entity")]
    PlanEntries,
    #[sea_orm(has_many = "super::menu_branch::Entity")]
    Branches,
    #[sea_orm(has_many = "super::menu_cost_center::Entity")]
    CostCenters,
    #[sea_orm(has_many = "super::menu_contract::Entity")]
    Contracts,
    #[sea_orm(has_many = "super::menu_period::Entity")]
    Periods,
    #[sea_orm(has_many = "super::menu_commercial_product::Entity")]
    CommercialProducts,
}

impl Related<super::menu_plan_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanEntries.def()
    }
}

impl Related<super::menu_branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branches.def()
    }
}

impl Related<super::menu_cost_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCenters.def()
    }
}

impl Related<super::menu_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::menu_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Periods.def()
    }
}

impl Related<super::menu_commercial_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommercialProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
