use chrono::{DateTime, FixedOffset};
use metrics::counter;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, Iterable, QueryFilter, Set};
use tracing::{debug, error};
use uuid::Uuid;

use super::budget::GenerationBudget;
use super::model::{GenerationKey, NewNecessity};
use crate::entities::necessity_record;
use crate::errors::ServiceError;

/// Bind parameters one insert statement may use. SQLite's default limit is
/// the tighter of the supported backends.
const MAX_BIND_PARAMS: usize = 32_766;

/// Rows per insert statement: the configured batch size, capped so one
/// statement stays under the bind parameter limit.
pub fn effective_batch_size(batch_size: usize) -> usize {
    let columns = necessity_record::Column::iter().count().max(1);
    batch_size.clamp(1, MAX_BIND_PARAMS / columns)
}

/// Stamp shared by every row of one run.
#[derive(Debug, Clone, Copy)]
pub struct RunStamp {
    pub generated_by: Option<i64>,
    pub generated_at: DateTime<FixedOffset>,
}

fn to_active_model(row: NewNecessity, stamp: RunStamp) -> necessity_record::ActiveModel {
    necessity_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        menu_id: Set(row.key.menu_id),
        menu_name: Set(row.menu_name),
        reference_month: Set(row.reference_month),
        reference_year: Set(row.reference_year),
        branch_id: Set(row.key.branch_id),
        branch_name: Set(row.branch_name),
        cost_center_id: Set(row.key.cost_center_id),
        cost_center_name: Set(row.cost_center_name),
        contract_id: Set(row.key.contract_id),
        contract_name: Set(row.contract_name),
        commercial_product_id: Set(row.commercial_product_id),
        commercial_product_name: Set(row.commercial_product_name),
        unit_id: Set(row.unit_id),
        unit_name: Set(row.unit_name),
        period_id: Set(row.period_id),
        period_name: Set(row.period_name),
        date: Set(row.date),
        dish_id: Set(row.dish_id),
        dish_name: Set(row.dish_name),
        product_id: Set(row.product_id),
        product_name: Set(row.product_name),
        product_unit: Set(row.product_unit),
        per_capita: Set(row.per_capita),
        average_demand: Set(row.average_demand),
        quantity: Set(row.quantity),
        display_order: Set(row.display_order),
        generated_by: Set(stamp.generated_by),
        generated_at: Set(stamp.generated_at),
    }
}

/// Deletes every stored row for `key`, then inserts `rows` in batches.
///
/// Must run on the generation transaction: callers commit only after this
/// returns `Ok`, so readers see either the previous set or the new one.
/// Returns the number of rows written.
pub async fn replace_rows<C: ConnectionTrait>(
    conn: &C,
    key: GenerationKey,
    rows: Vec<NewNecessity>,
    stamp: RunStamp,
    batch_size: usize,
    budget: &GenerationBudget,
) -> Result<u64, ServiceError> {
    let deleted = necessity_record::Entity::delete_many()
        .filter(necessity_record::Column::MenuId.eq(key.menu_id))
        .filter(necessity_record::Column::BranchId.eq(key.branch_id))
        .filter(necessity_record::Column::CostCenterId.eq(key.cost_center_id))
        .filter(necessity_record::Column::ContractId.eq(key.contract_id))
        .exec(conn)
        .await
        .map_err(|e| {
            error!(%key, error = %e, "Failed to delete previous necessity rows");
            ServiceError::db_error(e)
        })?;
    debug!(%key, deleted = deleted.rows_affected, "Previous necessity rows removed");

    let batch_size = effective_batch_size(batch_size);
    let mut written = 0u64;
    let mut rows = rows.into_iter().peekable();
    let mut batch_no = 0usize;

    while rows.peek().is_some() {
        budget.check()?;

        let batch: Vec<_> = rows
            .by_ref()
            .take(batch_size)
            .map(|row| to_active_model(row, stamp))
            .collect();
        let len = batch.len() as u64;

        necessity_record::Entity::insert_many(batch)
            .exec_without_returning(conn)
            .await
            .map_err(|e| {
                error!(%key, batch = batch_no, error = %e, "Failed to insert necessity batch");
                ServiceError::db_error(e)
            })?;

        written += len;
        batch_no += 1;
        counter!("foodplan.necessity.batches_inserted", 1);
    }

    debug!(%key, written, batches = batch_no, "Necessity rows inserted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_capped_by_bind_limit() {
        let columns = necessity_record::Column::iter().count();
        assert_eq!(effective_batch_size(1000), 1000);
        assert_eq!(effective_batch_size(0), 1);
        assert_eq!(effective_batch_size(10_000), MAX_BIND_PARAMS / columns);
        assert!(effective_batch_size(10_000) * columns <= MAX_BIND_PARAMS);
    }
}
