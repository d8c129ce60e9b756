use super::model::{EligibleUnit, GenerationKey};
use super::snapshot::PlanningSnapshot;
use crate::errors::ServiceError;

/// Serving units that should receive necessity rows for `key`.
///
/// A unit qualifies when its contract link is active, the contract itself is
/// active and belongs to the requested branch and cost center, and the menu
/// is assigned to the contract, that branch and that cost center. Branch and
/// cost center names come from the menu assignment when it stores one.
///
/// # Errors
/// `NotFound` when no unit qualifies; generation never runs partially.
pub fn resolve_units(
    snapshot: &PlanningSnapshot,
    key: GenerationKey,
) -> Result<Vec<EligibleUnit>, ServiceError> {
    let no_units = || {
        ServiceError::NotFound(format!("no serving unit matches {}", key))
    };

    let contract = match &snapshot.contract {
        Some(contract)
            if contract.status.is_active()
                && contract.branch_id == key.branch_id
                && contract.cost_center_id == key.cost_center_id =>
        {
            contract
        }
        _ => return Err(no_units()),
    };

    if !snapshot.menu_has_contract {
        return Err(no_units());
    }

    let branch_name = match snapshot.menu_branches.get(&key.branch_id) {
        Some(stored) => stored.clone().unwrap_or_else(|| contract.branch_name.clone()),
        None => return Err(no_units()),
    };
    let cost_center_name = match snapshot.menu_cost_centers.get(&key.cost_center_id) {
        Some(stored) => stored
            .clone()
            .unwrap_or_else(|| contract.cost_center_name.clone()),
        None => return Err(no_units()),
    };

    let units: Vec<EligibleUnit> = snapshot
        .contract_units
        .iter()
        .filter(|link| link.contract_id == contract.id && link.status.is_active())
        .map(|link| EligibleUnit {
            unit_id: link.unit_id,
            unit_name: link.unit_name.clone(),
            branch_id: contract.branch_id,
            branch_name: branch_name.clone(),
            cost_center_id: contract.cost_center_id,
            cost_center_name: cost_center_name.clone(),
            contract_id: contract.id,
            contract_name: contract.name.clone(),
        })
        .collect();

    if units.is_empty() {
        return Err(no_units());
    }
    Ok(units)
}
