#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use foodplan_api::{
    app_router,
    config::AppConfig,
    db,
    entities::{
        attendance_period, average_demand, contract, contract_unit, dish, dish_product, menu,
        menu_branch, menu_commercial_product, menu_contract, menu_cost_center, menu_period,
        menu_plan_entry, unit_period, RecordStatus,
    },
    AppState,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const MENU: i64 = 1;
pub const BRANCH: i64 = 10;
pub const COST_CENTER: i64 = 20;
pub const CONTRACT: i64 = 30;
pub const UNIT: i64 = 100;
pub const LUNCH: i64 = 1;
pub const SNACK: i64 = 2;
pub const RICE_AND_BEANS: i64 = 500;
pub const RICE: i64 = 9001;
pub const BEANS: i64 = 9002;

pub fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
}

/// Helper harness backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with a freshly migrated schema.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.necessity_batch_size = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        match body {
            Some(json) => {
                self.send(method, uri, Some("application/json"), json.to_string())
                    .await
            }
            None => self.send(method, uri, None, String::new()).await,
        }
    }

    /// Sends a raw body with an optional content type.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body)).expect("request"))
            .await
            .expect("router response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Runs raw SQL against the test database.
    pub async fn execute_sql(&self, sql: &str) {
        self.db()
            .execute_unprepared(sql)
            .await
            .expect("raw sql");
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn generate(&self, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/api/v1/cardapios/gerar-necessidade", Some(body))
            .await
    }

    pub async fn generate_default(&self) -> (StatusCode, Value) {
        self.generate(json!({
            "cardapio_id": MENU,
            "filial_id": BRANCH,
            "centro_custo_id": COST_CENTER,
            "contrato_id": CONTRACT,
            "usuario_id": 42
        }))
        .await
    }

    /// Seeds one menu for branch F1, cost center C1 and contract K1 with a
    /// single unit U1 serving Lunch and Snack. The menu only plans Lunch, with
    /// Rice and Beans on 2025-03-10 for an average of 250 diners.
    pub async fn seed_scenario(&self) {
        let db = self.db();
        let now: DateTime<FixedOffset> = Utc::now().into();

        for (id, name) in [(LUNCH, "Lunch"), (SNACK, "Snack")] {
            attendance_period::Entity::insert(attendance_period::ActiveModel {
                id: Set(id),
                name: Set(name.to_string()),
                status: Set(RecordStatus::Active),
            })
            .exec_without_returning(db)
            .await
            .expect("seed period");
        }

        menu::Entity::insert(menu::ActiveModel {
            id: Set(MENU),
            name: Set("March menu".to_string()),
            reference_month: Set(3),
            reference_year: Set(2025),
            week_count: Set(4),
            status: Set(RecordStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(db)
        .await
        .expect("seed menu");

        menu_branch::Entity::insert(menu_branch::ActiveModel {
            menu_id: Set(MENU),
            branch_id: Set(BRANCH),
            branch_name: Set(Some("F1".to_string())),
        })
        .exec_without_returning(db)
        .await
        .expect("seed menu branch");

        menu_cost_center::Entity::insert(menu_cost_center::ActiveModel {
            menu_id: Set(MENU),
            cost_center_id: Set(COST_CENTER),
            cost_center_name: Set(Some("C1".to_string())),
        })
        .exec_without_returning(db)
        .await
        .expect("seed menu cost center");

        menu_contract::Entity::insert(menu_contract::ActiveModel {
            menu_id: Set(MENU),
            contract_id: Set(CONTRACT),
        })
        .exec_without_returning(db)
        .await
        .expect("seed menu contract");

        menu_period::Entity::insert(menu_period::ActiveModel {
            menu_id: Set(MENU),
            period_id: Set(LUNCH),
        })
        .exec_without_returning(db)
        .await
        .expect("seed menu period");

        contract::Entity::insert(contract::ActiveModel {
            id: Set(CONTRACT),
            name: Set("K1".to_string()),
            branch_id: Set(BRANCH),
            branch_name: Set("F1".to_string()),
            cost_center_id: Set(COST_CENTER),
            cost_center_name: Set("C1".to_string()),
            status: Set(RecordStatus::Active),
        })
        .exec_without_returning(db)
        .await
        .expect("seed contract");

        self.add_unit(UNIT, "U1").await;
        self.link_unit_period(UNIT, LUNCH, RecordStatus::Active).await;
        self.link_unit_period(UNIT, SNACK, RecordStatus::Active).await;

        dish::Entity::insert(dish::ActiveModel {
            id: Set(RICE_AND_BEANS),
            name: Set("Rice and Beans".to_string()),
        })
        .exec_without_returning(db)
        .await
        .expect("seed dish");

        self.add_bom_line(1, RICE_AND_BEANS, RICE, "Rice", dec!(0.100)).await;
        self.add_bom_line(2, RICE_AND_BEANS, BEANS, "Beans", dec!(0.080)).await;
        self.add_plan_entry(1, march(10), RICE_AND_BEANS, None, 1).await;
        self.set_demand(1, UNIT, LUNCH, dec!(250)).await;
    }

    pub async fn add_unit(&self, unit_id: i64, name: &str) {
        contract_unit::Entity::insert(contract_unit::ActiveModel {
            contract_id: Set(CONTRACT),
            unit_id: Set(unit_id),
            unit_name: Set(name.to_string()),
            status: Set(RecordStatus::Active),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed contract unit");
    }

    pub async fn link_unit_period(&self, unit_id: i64, period_id: i64, status: RecordStatus) {
        unit_period::Entity::insert(unit_period::ActiveModel {
            unit_id: Set(unit_id),
            period_id: Set(period_id),
            status: Set(status),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed unit period");
    }

    pub async fn add_menu_period(&self, period_id: i64) {
        menu_period::Entity::insert(menu_period::ActiveModel {
            menu_id: Set(MENU),
            period_id: Set(period_id),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed menu period");
    }

    pub async fn add_bom_line(
        &self,
        id: i64,
        dish_id: i64,
        product_id: i64,
        product_name: &str,
        per_capita: Decimal,
    ) {
        dish_product::Entity::insert(dish_product::ActiveModel {
            id: Set(id),
            dish_id: Set(dish_id),
            cost_center_id: Set(COST_CENTER),
            product_id: Set(product_id),
            product_name: Set(product_name.to_string()),
            unit_symbol: Set("kg".to_string()),
            per_capita: Set(per_capita),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed dish product");
    }

    pub async fn add_plan_entry(
        &self,
        id: i64,
        date: NaiveDate,
        dish_id: i64,
        commercial_product_id: Option<i64>,
        display_order: i32,
    ) {
        menu_plan_entry::Entity::insert(menu_plan_entry::ActiveModel {
            id: Set(id),
            menu_id: Set(MENU),
            date: Set(date),
            dish_id: Set(dish_id),
            commercial_product_id: Set(commercial_product_id),
            display_order: Set(display_order),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed plan entry");
    }

    pub async fn add_commercial_product(&self, id: i64, name: &str) {
        menu_commercial_product::Entity::insert(menu_commercial_product::ActiveModel {
            menu_id: Set(MENU),
            commercial_product_id: Set(id),
            commercial_name: Set(name.to_string()),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed commercial product");
    }

    pub async fn set_demand(&self, id: i64, unit_id: i64, period_id: i64, average: Decimal) {
        average_demand::Entity::insert(average_demand::ActiveModel {
            id: Set(id),
            unit_id: Set(unit_id),
            period_id: Set(period_id),
            average: Set(average),
        })
        .exec_without_returning(self.db())
        .await
        .expect("seed average demand");
    }
}
