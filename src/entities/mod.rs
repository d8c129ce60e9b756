//! Persistence models for menu planning and the materialized necessity table.

pub mod attendance_period;
pub mod average_demand;
pub mod contract;
pub mod contract_unit;
pub mod dish;
pub mod dish_product;
pub mod menu;
pub mod menu_branch;
pub mod menu_commercial_product;
pub mod menu_contract;
pub mod menu_cost_center;
pub mod menu_period;
pub mod menu_plan_entry;
pub mod necessity_record;
pub mod status;
pub mod unit_period;

pub use status::RecordStatus;
