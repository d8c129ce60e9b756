use super::model::ResolvedPeriod;
use super::snapshot::PlanningSnapshot;

/// Attendance periods served by `unit_id` that the menu also declares.
///
/// The unit link and the period itself must both be active. Anything failing
/// either side is left out silently.
pub fn resolve_periods(snapshot: &PlanningSnapshot, unit_id: i64) -> Vec<ResolvedPeriod> {
    let mut periods: Vec<ResolvedPeriod> = snapshot
        .unit_periods
        .iter()
        .filter(|link| link.unit_id == unit_id && link.status.is_active())
        .filter(|link| snapshot.menu_periods.contains(&link.period_id))
        .filter_map(|link| snapshot.periods.get(&link.period_id))
        .filter(|period| period.status.is_active())
        .map(|period| ResolvedPeriod {
            id: period.id,
            name: period.name.clone(),
        })
        .collect();
    periods.sort_by_key(|p| p.id);
    periods.dedup_by_key(|p| p.id);
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RecordStatus;
    use crate::services::necessity::snapshot::fixtures::{self, *};

    #[test]
    fn only_periods_linked_to_unit_and_menu_survive() {
        // snack is linked to the unit but not declared by the menu
        let periods = resolve_periods(&fixtures::snapshot(), UNIT);
        assert_eq!(
            periods,
            vec![ResolvedPeriod {
                id: LUNCH,
                name: "Lunch".into()
            }]
        );
    }

    #[test]
    fn menu_period_without_unit_link_is_excluded() {
        let mut snapshot = fixtures::snapshot();
        snapshot.unit_periods.retain(|l| l.period_id != LUNCH);
        snapshot.menu_periods.insert(SNACK);
        let ids: Vec<_> = resolve_periods(&snapshot, UNIT).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![SNACK]);
    }

    #[test]
    fn inactive_link_or_period_is_excluded() {
        let mut snapshot = fixtures::snapshot();
        snapshot.unit_periods[0].status = RecordStatus::Inactive;
        assert!(resolve_periods(&snapshot, UNIT).is_empty());

        let mut snapshot = fixtures::snapshot();
        if let Some(lunch) = snapshot.periods.get_mut(&LUNCH) {
            lunch.status = RecordStatus::Inactive;
        }
        assert!(resolve_periods(&snapshot, UNIT).is_empty());
    }

    #[test]
    fn other_units_have_no_periods() {
        assert!(resolve_periods(&fixtures::snapshot(), UNIT + 99).is_empty());
    }
}
