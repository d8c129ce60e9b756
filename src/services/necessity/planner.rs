use super::budget::GenerationBudget;
use super::calculator::compute_quantity;
use super::menu_plan::read_plan;
use super::model::{EligibleUnit, GenerationKey, NewNecessity};
use super::period_resolver::resolve_periods;
use super::snapshot::PlanningSnapshot;
use crate::errors::ServiceError;

/// Expands units x periods x plan entries x BOM lines into necessity rows.
///
/// Pure in-memory work over the snapshot. The budget is checked before each
/// plan entry so a huge grid can still be cancelled.
pub fn plan_rows(
    snapshot: &PlanningSnapshot,
    key: GenerationKey,
    units: &[EligibleUnit],
    budget: &GenerationBudget,
) -> Result<Vec<NewNecessity>, ServiceError> {
    let plan = read_plan(snapshot);
    let mut rows = Vec::new();

    for unit in units {
        for period in resolve_periods(snapshot, unit.unit_id) {
            let average = snapshot.demand.average_for(unit.unit_id, period.id);

            for entry in &plan {
                budget.check()?;

                for line in snapshot.bom.lines_for(entry.dish_id, unit.cost_center_id) {
                    let quantity =
                        compute_quantity(average, line.per_capita).map_err(|e| match e {
                            ServiceError::ComputationError(msg) => {
                                ServiceError::ComputationError(format!(
                                    "{} (unit {}, period {}, dish {}, product {})",
                                    msg, unit.unit_id, period.id, entry.dish_id, line.product_id
                                ))
                            }
                            other => other,
                        })?;

                    rows.push(NewNecessity {
                        key,
                        menu_name: snapshot.menu.name.clone(),
                        reference_month: snapshot.menu.reference_month,
                        reference_year: snapshot.menu.reference_year,
                        branch_name: unit.branch_name.clone(),
                        cost_center_name: unit.cost_center_name.clone(),
                        contract_name: unit.contract_name.clone(),
                        commercial_product_id: entry.commercial_product_id,
                        commercial_product_name: entry.commercial_product_name.clone(),
                        unit_id: unit.unit_id,
                        unit_name: unit.unit_name.clone(),
                        period_id: period.id,
                        period_name: period.name.clone(),
                        date: entry.date,
                        dish_id: entry.dish_id,
                        dish_name: entry.dish_name.clone(),
                        product_id: line.product_id,
                        product_name: line.product_name.clone(),
                        product_unit: line.unit_symbol.clone(),
                        per_capita: line.per_capita,
                        average_demand: average,
                        quantity,
                        display_order: entry.display_order,
                    });
                }
            }
        }
    }

    Ok(rows)
}
