use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::entities::average_demand;

/// Average servings per (unit, period).
#[derive(Debug, Clone, Default)]
pub struct DemandTable {
    averages: HashMap<(i64, i64), Decimal>,
}

impl DemandTable {
    /// Builds the table; when a pair has several rows the lowest id wins.
    pub fn from_rows(mut rows: Vec<average_demand::Model>) -> Self {
        rows.sort_by_key(|row| row.id);
        let mut averages = HashMap::with_capacity(rows.len());
        for row in rows {
            averages
                .entry((row.unit_id, row.period_id))
                .or_insert(row.average);
        }
        Self { averages }
    }

    /// Missing history counts as zero servings, never as an error.
    pub fn average_for(&self, unit_id: i64, period_id: i64) -> Decimal {
        self.averages
            .get(&(unit_id, period_id))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
