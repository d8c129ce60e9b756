//! Necessity generation engine.
//!
//! A run resolves the serving units, attendance periods, menu plan, demand
//! averages and recipes for one (menu, branch, cost center, contract) key,
//! computes one row per unit x period x dish x product, and atomically
//! replaces the stored rows for that key.

pub mod bom;
pub mod budget;
pub mod calculator;
pub mod config_resolver;
pub mod demand;
pub mod lock;
pub mod menu_plan;
pub mod model;
pub mod period_resolver;
pub mod planner;
pub mod reader;
pub mod snapshot;
pub mod store;

use chrono::Utc;
use metrics::{counter, histogram};
use sea_orm::{DatabaseConnection, PaginatorTrait};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::db;
use crate::errors::ServiceError;

pub use budget::{CancelHandle, GenerationBudget};
pub use lock::GenerationLocks;
pub use model::{
    GenerateNecessityRequest, GenerationCommand, GenerationKey, GenerationSummary,
    NecessityFilter,
};
pub use reader::{ExportRow, NecessityRow};

/// Tuning knobs for the engine, taken from `AppConfig`.
#[derive(Debug, Clone)]
pub struct NecessitySettings {
    pub batch_size: usize,
    pub generation_timeout: Option<Duration>,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for NecessitySettings {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            generation_timeout: Some(Duration::from_secs(300)),
            default_page_size: 50,
            max_page_size: 1000,
        }
    }
}

impl From<&AppConfig> for NecessitySettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            batch_size: cfg.necessity_batch_size,
            generation_timeout: cfg.generation_timeout(),
            default_page_size: cfg.api_default_page_size,
            max_page_size: cfg.api_max_page_size,
        }
    }
}

/// One page of listed rows.
#[derive(Debug, Clone)]
pub struct NecessityPage {
    pub rows: Vec<NecessityRow>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

/// Service for generating and reading menu necessities
#[derive(Clone)]
pub struct NecessityService {
    db: Arc<DatabaseConnection>,
    locks: GenerationLocks,
    settings: NecessitySettings,
}

impl NecessityService {
    pub fn new(db: Arc<DatabaseConnection>, settings: NecessitySettings) -> Self {
        Self {
            db,
            locks: GenerationLocks::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &NecessitySettings {
        &self.settings
    }

    /// Validates the request and runs a generation with the configured deadline.
    pub async fn generate(
        &self,
        request: GenerateNecessityRequest,
    ) -> Result<GenerationSummary, ServiceError> {
        let command = request.into_command()?;
        let budget = GenerationBudget::new(self.settings.generation_timeout);
        self.generate_with_budget(command, budget).await
    }

    /// Runs one generation: serialize on the key, open a transaction, load the
    /// snapshot, plan the rows, replace the stored set and commit. Any error
    /// drops the transaction, which rolls it back.
    #[instrument(skip(self, budget), fields(key = %command.key))]
    pub async fn generate_with_budget(
        &self,
        command: GenerationCommand,
        budget: GenerationBudget,
    ) -> Result<GenerationSummary, ServiceError> {
        let key = command.key;
        let started = Instant::now();
        counter!("foodplan.necessity.generation.started", 1);

        let result = self.run_generation(command, &budget).await;

        histogram!("foodplan.necessity.generation.duration", started.elapsed());
        match result {
            Ok(written) => {
                counter!("foodplan.necessity.generation.succeeded", 1);
                counter!("foodplan.necessity.rows_written", written);
                info!(
                    menu_id = key.menu_id,
                    branch_id = key.branch_id,
                    cost_center_id = key.cost_center_id,
                    contract_id = key.contract_id,
                    rows = written,
                    elapsed = ?started.elapsed(),
                    "Necessity generated"
                );
                Ok(GenerationSummary {
                    message: "Necessity generated successfully".to_string(),
                    total_registros: written,
                    filtros: key,
                })
            }
            Err(err) => {
                counter!("foodplan.necessity.generation.failed", 1, "kind" => err.kind());
                error!(
                    menu_id = key.menu_id,
                    branch_id = key.branch_id,
                    cost_center_id = key.cost_center_id,
                    contract_id = key.contract_id,
                    kind = err.kind(),
                    error = %err,
                    "Necessity generation failed"
                );
                Err(err)
            }
        }
    }

    async fn run_generation(
        &self,
        command: GenerationCommand,
        budget: &GenerationBudget,
    ) -> Result<u64, ServiceError> {
        let key = command.key;
        let _guard = self.locks.acquire(key).await;
        budget.check()?;

        let opened_at = Instant::now();
        let txn = db::begin_transaction(&self.db).await?;

        let snapshot = snapshot::PlanningSnapshot::load(&txn, key).await?;
        let units = config_resolver::resolve_units(&snapshot, key)?;
        let rows = planner::plan_rows(&snapshot, key, &units, budget)?;

        let stamp = store::RunStamp {
            generated_by: command.generated_by,
            generated_at: Utc::now().into(),
        };
        let written =
            store::replace_rows(&txn, key, rows, stamp, self.settings.batch_size, budget).await?;

        budget.check()?;
        db::commit_transaction(txn, opened_at).await?;
        Ok(written)
    }

    /// Paginated, filtered listing in report order.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: NecessityFilter) -> Result<NecessityPage, ServiceError> {
        let db = &*self.db;
        let (page, limit) = reader::page_window(
            &filter,
            self.settings.default_page_size,
            self.settings.max_page_size,
        )?;

        let paginator = reader::filtered_query(&filter).paginate(db, limit);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting necessities");
            ServiceError::db_error(e)
        })?;

        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            error!(page, limit, error = %e, "Database error when fetching necessities");
            ServiceError::db_error(e)
        })?;

        Ok(NecessityPage {
            rows: rows.into_iter().map(NecessityRow::from).collect(),
            page,
            limit,
            total,
        })
    }

    /// Every row matching the filter, without a row cap, relabelled for reports.
    #[instrument(skip(self))]
    pub async fn export(&self, filter: NecessityFilter) -> Result<Vec<ExportRow>, ServiceError> {
        let rows = reader::filtered_query(&filter)
            .all(&*self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when exporting necessities");
                ServiceError::db_error(e)
            })?;

        Ok(rows.into_iter().map(ExportRow::from).collect())
    }
}
