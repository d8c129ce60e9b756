use std::collections::HashMap;

use super::model::BomLine;
use crate::entities::dish_product;

/// Bill of materials lines keyed by (dish, cost center), in row id order.
#[derive(Debug, Clone, Default)]
pub struct BomTable {
    lines: HashMap<(i64, i64), Vec<BomLine>>,
}

impl BomTable {
    pub fn from_rows(mut rows: Vec<dish_product::Model>) -> Self {
        rows.sort_by_key(|row| row.id);
        let mut lines: HashMap<(i64, i64), Vec<BomLine>> = HashMap::new();
        for row in rows {
            lines
                .entry((row.dish_id, row.cost_center_id))
                .or_default()
                .push(BomLine {
                    product_id: row.product_id,
                    product_name: row.product_name,
                    unit_symbol: row.unit_symbol,
                    per_capita: row.per_capita,
                });
        }
        Self { lines }
    }

    /// Empty when the dish has no recipe for the cost center; such dishes
    /// produce no necessity rows.
    pub fn lines_for(&self, dish_id: i64, cost_center_id: i64) -> &[BomLine] {
        self.lines
            .get(&(dish_id, cost_center_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
