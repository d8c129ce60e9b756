use super::model::PlanEntry;
use super::snapshot::PlanningSnapshot;

/// Commercial product id recorded when a plan entry has no override.
pub const NO_COMMERCIAL_PRODUCT: i64 = 0;

/// The menu's dishes ordered by (date, display order). Entries pointing at a
/// dish that no longer exists are dropped.
pub fn read_plan(snapshot: &PlanningSnapshot) -> Vec<PlanEntry> {
    let mut entries: Vec<_> = snapshot.plan_entries.iter().collect();
    entries.sort_by_key(|e| (e.date, e.display_order, e.id));

    entries
        .into_iter()
        .filter_map(|entry| {
            let dish = snapshot.dishes.get(&entry.dish_id)?;
            let (commercial_product_id, commercial_product_name) =
                match entry.commercial_product_id.filter(|id| *id != NO_COMMERCIAL_PRODUCT) {
                    Some(id) => (
                        id,
                        snapshot
                            .commercial_products
                            .get(&id)
                            .cloned()
                            .unwrap_or_default(),
                    ),
                    None => (NO_COMMERCIAL_PRODUCT, String::new()),
                };
            Some(PlanEntry {
                date: entry.date,
                dish_id: dish.id,
                dish_name: dish.name.clone(),
                commercial_product_id,
                commercial_product_name,
                display_order: entry.display_order,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{dish, menu_plan_entry};
    use crate::services::necessity::snapshot::fixtures::{self, *};
    use chrono::NaiveDate;

    fn entry(id: i64, day: u32, dish_id: i64, order: i32, cp: Option<i64>) -> menu_plan_entry::Model {
        menu_plan_entry::Model {
            id,
            menu_id: MENU,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            dish_id,
            commercial_product_id: cp,
            display_order: order,
        }
    }

    #[test]
    fn missing_override_uses_zero_sentinel() {
        let plan = read_plan(&fixtures::snapshot());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].commercial_product_id, NO_COMMERCIAL_PRODUCT);
        assert_eq!(plan[0].commercial_product_name, "");
        assert_eq!(plan[0].dish_name, "Rice and Beans");
    }

    #[test]
    fn entries_are_ordered_and_orphans_dropped() {
        let mut snapshot = fixtures::snapshot();
        snapshot.dishes.insert(
            600,
            dish::Model {
                id: 600,
                name: "Soup".into(),
            },
        );
        snapshot.commercial_products.insert(77, "Standard".into());
        snapshot.plan_entries = vec![
            entry(1, 11, RICE_AND_BEANS, 1, None),
            entry(2, 10, 600, 2, Some(77)),
            entry(3, 10, RICE_AND_BEANS, 1, None),
            entry(4, 10, 999, 0, None),
        ];

        let plan = read_plan(&snapshot);
        let got: Vec<_> = plan
            .iter()
            .map(|p| (p.date.format("%d").to_string(), p.dish_id, p.commercial_product_id))
            .collect();
        assert_eq!(
            got,
            vec![
                ("10".to_string(), RICE_AND_BEANS, 0),
                ("10".to_string(), 600, 77),
                ("11".to_string(), RICE_AND_BEANS, 0),
            ]
        );
        assert_eq!(plan[1].commercial_product_name, "Standard");
    }
}
