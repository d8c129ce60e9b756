use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activation flag shared by contracts, links and attendance periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[sea_orm(string_value = "ativo")]
    Active,
    #[sea_orm(string_value = "inativo")]
    Inactive,
}

impl RecordStatus {
    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}
