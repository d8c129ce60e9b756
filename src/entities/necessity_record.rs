use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Materialized necessity row.
///
/// Rows are written only by a generation run and replaced wholesale by the
/// next run for the same (menu, branch, cost center, contract) key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "necessity_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub menu_id: i64,
    pub menu_name: String,
    pub reference_month: i32,
    pub reference_year: i32,
    pub branch_id: i64,
    pub branch_name: String,
    pub cost_center_id: i64,
    pub cost_center_name: String,
    pub contract_id: i64,
    pub contract_name: String,
    pub commercial_product_id: i64,
    pub commercial_product_name: String,
    pub unit_id: i64,
    pub unit_name: String,
    pub period_id: i64,
    pub period_name: String,
    pub date: Date,
    pub dish_id: i64,
    pub dish_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub product_unit: String,
    #[sea_orm(column_type = "Decimal(Some((14, 6)))")]
    pub per_capita: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 3)))")]
    pub average_demand: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 3)))")]
    pub quantity: Decimal,
    pub display_order: i32,
    pub generated_by: Option<i64>,
    pub generated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
