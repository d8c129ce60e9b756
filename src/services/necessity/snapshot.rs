use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, instrument};

use super::bom::BomTable;
use super::demand::DemandTable;
use super::model::{GenerationKey, MenuHeader};
use crate::entities::{
    attendance_period, average_demand, contract, contract_unit, dish, dish_product, menu,
    menu_branch, menu_commercial_product, menu_contract, menu_cost_center, menu_period,
    menu_plan_entry, unit_period,
};
use crate::errors::ServiceError;

/// Every input a generation run needs, fetched once with a fixed number of
/// queries and then resolved in memory.
#[derive(Debug, Clone)]
pub struct PlanningSnapshot {
    pub menu: MenuHeader,
    pub contract: Option<contract::Model>,
    pub menu_has_contract: bool,
    pub contract_units: Vec<contract_unit::Model>,
    /// Branch id -> name stored on the menu assignment
    pub menu_branches: HashMap<i64, Option<String>>,
    pub menu_cost_centers: HashMap<i64, Option<String>>,
    pub menu_periods: HashSet<i64>,
    pub unit_periods: Vec<unit_period::Model>,
    pub periods: HashMap<i64, attendance_period::Model>,
    pub plan_entries: Vec<menu_plan_entry::Model>,
    pub dishes: HashMap<i64, dish::Model>,
    pub commercial_products: HashMap<i64, String>,
    pub demand: DemandTable,
    pub bom: BomTable,
}

fn load_failed(what: &'static str) -> impl FnOnce(DbErr) -> ServiceError {
    move |e| {
        error!(error = %e, "Failed to load {}", what);
        ServiceError::db_error(e)
    }
}

impl PlanningSnapshot {
    /// Loads the snapshot for `key` through `conn`, normally the generation
    /// transaction.
    ///
    /// # Errors
    /// `NotFound` when the menu does not exist, `DatabaseError` on query failure.
    #[instrument(skip(conn), fields(menu_id = key.menu_id, contract_id = key.contract_id))]
    pub async fn load<C: ConnectionTrait>(conn: &C, key: GenerationKey) -> Result<Self, ServiceError> {
        let menu = menu::Entity::find_by_id(key.menu_id)
            .one(conn)
            .await
            .map_err(load_failed("menu"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Menu {} not found", key.menu_id)))?;

        let contract = contract::Entity::find_by_id(key.contract_id)
            .one(conn)
            .await
            .map_err(load_failed("contract"))?;

        let menu_has_contract = menu_contract::Entity::find_by_id((key.menu_id, key.contract_id))
            .one(conn)
            .await
            .map_err(load_failed("menu contract link"))?
            .is_some();

        let contract_units = contract_unit::Entity::find()
            .filter(contract_unit::Column::ContractId.eq(key.contract_id))
            .order_by_asc(contract_unit::Column::UnitId)
            .all(conn)
            .await
            .map_err(load_failed("contract units"))?;

        let menu_branches = menu_branch::Entity::find()
            .filter(menu_branch::Column::MenuId.eq(key.menu_id))
            .all(conn)
            .await
            .map_err(load_failed("menu branches"))?
            .into_iter()
            .map(|row| (row.branch_id, row.branch_name))
            .collect();

        let menu_cost_centers = menu_cost_center::Entity::find()
            .filter(menu_cost_center::Column::MenuId.eq(key.menu_id))
            .all(conn)
            .await
            .map_err(load_failed("menu cost centers"))?
            .into_iter()
            .map(|row| (row.cost_center_id, row.cost_center_name))
            .collect();

        let menu_periods: HashSet<i64> = menu_period::Entity::find()
            .filter(menu_period::Column::MenuId.eq(key.menu_id))
            .all(conn)
            .await
            .map_err(load_failed("menu periods"))?
            .into_iter()
            .map(|row| row.period_id)
            .collect();

        let unit_ids: Vec<i64> = contract_units.iter().map(|u| u.unit_id).collect();

        let (unit_periods, demand_rows) = if unit_ids.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let unit_periods = unit_period::Entity::find()
                .filter(unit_period::Column::UnitId.is_in(unit_ids.clone()))
                .order_by_asc(unit_period::Column::UnitId)
                .order_by_asc(unit_period::Column::PeriodId)
                .all(conn)
                .await
                .map_err(load_failed("unit periods"))?;

            let demand_rows = average_demand::Entity::find()
                .filter(average_demand::Column::UnitId.is_in(unit_ids))
                .order_by_asc(average_demand::Column::Id)
                .all(conn)
                .await
                .map_err(load_failed("average demands"))?;

            (unit_periods, demand_rows)
        };

        let periods = if menu_periods.is_empty() {
            HashMap::new()
        } else {
            attendance_period::Entity::find()
                .filter(attendance_period::Column::Id.is_in(menu_periods.iter().copied()))
                .all(conn)
                .await
                .map_err(load_failed("attendance periods"))?
                .into_iter()
                .map(|row| (row.id, row))
                .collect()
        };

        let plan_entries = menu_plan_entry::Entity::find()
            .filter(menu_plan_entry::Column::MenuId.eq(key.menu_id))
            .order_by_asc(menu_plan_entry::Column::Date)
            .order_by_asc(menu_plan_entry::Column::DisplayOrder)
            .order_by_asc(menu_plan_entry::Column::Id)
            .all(conn)
            .await
            .map_err(load_failed("menu plan entries"))?;

        let dish_ids: HashSet<i64> = plan_entries.iter().map(|e| e.dish_id).collect();

        let (dishes, bom_rows) = if dish_ids.is_empty() {
            (HashMap::new(), Vec::new())
        } else {
            let dishes = dish::Entity::find()
                .filter(dish::Column::Id.is_in(dish_ids.iter().copied()))
                .all(conn)
                .await
                .map_err(load_failed("dishes"))?
                .into_iter()
                .map(|row| (row.id, row))
                .collect();

            let bom_rows = dish_product::Entity::find()
                .filter(dish_product::Column::DishId.is_in(dish_ids.iter().copied()))
                .filter(dish_product::Column::CostCenterId.eq(key.cost_center_id))
                .order_by_asc(dish_product::Column::Id)
                .all(conn)
                .await
                .map_err(load_failed("dish products"))?;

            (dishes, bom_rows)
        };

        let commercial_products = menu_commercial_product::Entity::find()
            .filter(menu_commercial_product::Column::MenuId.eq(key.menu_id))
            .all(conn)
            .await
            .map_err(load_failed("menu commercial products"))?
            .into_iter()
            .map(|row| (row.commercial_product_id, row.commercial_name))
            .collect();

        debug!(
            units = contract_units.len(),
            plan_entries = plan_entries.len(),
            bom_lines = bom_rows.len(),
            "Planning snapshot loaded"
        );

        Ok(Self {
            menu: MenuHeader {
                id: menu.id,
                name: menu.name,
                reference_month: menu.reference_month,
                reference_year: menu.reference_year,
            },
            contract,
            menu_has_contract,
            contract_units,
            menu_branches,
            menu_cost_centers,
            menu_periods,
            unit_periods,
            periods,
            plan_entries,
            dishes,
            commercial_products,
            demand: DemandTable::from_rows(demand_rows),
            bom: BomTable::from_rows(bom_rows),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory snapshot matching the rice-and-beans planning example.
    use super::*;
    use crate::entities::RecordStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    pub const MENU: i64 = 1;
    pub const BRANCH: i64 = 10;
    pub const COST_CENTER: i64 = 20;
    pub const CONTRACT: i64 = 30;
    pub const UNIT: i64 = 100;
    pub const LUNCH: i64 = 1;
    pub const SNACK: i64 = 2;
    pub const RICE_AND_BEANS: i64 = 500;

    pub fn key() -> GenerationKey {
        GenerationKey {
            menu_id: MENU,
            branch_id: BRANCH,
            cost_center_id: COST_CENTER,
            contract_id: CONTRACT,
        }
    }

    pub fn snapshot() -> PlanningSnapshot {
        PlanningSnapshot {
            menu: MenuHeader {
                id: MENU,
                name: "March menu".into(),
                reference_month: 3,
                reference_year: 2025,
            },
            contract: Some(contract::Model {
                id: CONTRACT,
                name: "K1".into(),
                branch_id: BRANCH,
                branch_name: "F1 (contract)".into(),
                cost_center_id: COST_CENTER,
                cost_center_name: "C1 (contract)".into(),
                status: RecordStatus::Active,
            }),
            menu_has_contract: true,
            contract_units: vec![contract_unit::Model {
                contract_id: CONTRACT,
                unit_id: UNIT,
                unit_name: "U1".into(),
                status: RecordStatus::Active,
            }],
            menu_branches: HashMap::from([(BRANCH, Some("F1".to_string()))]),
            menu_cost_centers: HashMap::from([(COST_CENTER, None)]),
            menu_periods: HashSet::from([LUNCH]),
            unit_periods: vec![
                unit_period::Model {
                    unit_id: UNIT,
                    period_id: LUNCH,
                    status: RecordStatus::Active,
                },
                unit_period::Model {
                    unit_id: UNIT,
                    period_id: SNACK,
                    status: RecordStatus::Active,
                },
            ],
            periods: HashMap::from([
                (
                    LUNCH,
                    attendance_period::Model {
                        id: LUNCH,
                        name: "Lunch".into(),
                        status: RecordStatus::Active,
                    },
                ),
                (
                    SNACK,
                    attendance_period::Model {
                        id: SNACK,
                        name: "Snack".into(),
                        status: RecordStatus::Active,
                    },
                ),
            ]),
            plan_entries: vec![menu_plan_entry::Model {
                id: 1,
                menu_id: MENU,
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                dish_id: RICE_AND_BEANS,
                commercial_product_id: None,
                display_order: 1,
            }],
            dishes: HashMap::from([(
                RICE_AND_BEANS,
                dish::Model {
                    id: RICE_AND_BEANS,
                    name: "Rice and Beans".into(),
                },
            )]),
            commercial_products: HashMap::new(),
            demand: DemandTable::from_rows(vec![average_demand::Model {
                id: 1,
                unit_id: UNIT,
                period_id: LUNCH,
                average: dec!(250),
            }]),
            bom: BomTable::from_rows(vec![
                dish_product::Model {
                    id: 1,
                    dish_id: RICE_AND_BEANS,
                    cost_center_id: COST_CENTER,
                    product_id: 9001,
                    product_name: "Rice".into(),
                    unit_symbol: "kg".into(),
                    per_capita: dec!(0.100),
                },
                dish_product::Model {
                    id: 2,
                    dish_id: RICE_AND_BEANS,
                    cost_center_id: COST_CENTER,
                    product_id: 9002,
                    product_name: "Beans".into(),
                    unit_symbol: "kg".into(),
                    per_capita: dec!(0.080),
                },
            ]),
        }
    }
}
