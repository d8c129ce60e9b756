use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::calculator::QUANTITY_SCALE;
use super::model::NecessityFilter;
use crate::entities::necessity_record::{self, Column};
use crate::errors::ServiceError;

/// Conjunction of every filter that is present. The date range is inclusive.
pub fn filter_condition(filter: &NecessityFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(id) = filter.cardapio_id {
        condition = condition.add(Column::MenuId.eq(id));
    }
    if let Some(id) = filter.filial_id {
        condition = condition.add(Column::BranchId.eq(id));
    }
    if let Some(id) = filter.centro_custo_id {
        condition = condition.add(Column::CostCenterId.eq(id));
    }
    if let Some(id) = filter.contrato_id {
        condition = condition.add(Column::ContractId.eq(id));
    }
    if let Some(id) = filter.unidade_id {
        condition = condition.add(Column::UnitId.eq(id));
    }
    if let Some(id) = filter.periodo_atendimento_id {
        condition = condition.add(Column::PeriodId.eq(id));
    }
    if let Some(id) = filter.produto_id {
        condition = condition.add(Column::ProductId.eq(id));
    }
    if let Some(from) = filter.data_inicio {
        condition = condition.add(Column::Date.gte(from));
    }
    if let Some(to) = filter.data_fim {
        condition = condition.add(Column::Date.lte(to));
    }

    condition
}

/// Filtered query in report order.
pub fn filtered_query(filter: &NecessityFilter) -> Select<necessity_record::Entity> {
    necessity_record::Entity::find()
        .filter(filter_condition(filter))
        .order_by_asc(Column::Date)
        .order_by_asc(Column::UnitName)
        .order_by_asc(Column::PeriodName)
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::DishName)
        .order_by_asc(Column::Id)
}

/// Page and limit after defaults and caps are applied.
///
/// # Errors
/// `ValidationError` when the page would start beyond the largest offset the
/// database accepts.
pub fn page_window(
    filter: &NecessityFilter,
    default_limit: u64,
    max_limit: u64,
) -> Result<(u64, u64), ServiceError> {
    let page = filter.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = filter
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(default_limit)
        .min(max_limit)
        .max(1);

    let offset = (page - 1).checked_mul(limit);
    match offset {
        Some(offset) if offset <= i64::MAX as u64 => Ok((page, limit)),
        _ => Err(ServiceError::ValidationError(format!(
            "page {} is out of range for limit {}",
            page, limit
        ))),
    }
}

fn with_scale(mut value: Decimal, scale: u32) -> Decimal {
    value.rescale(scale);
    value
}

/// Listed necessity row, field names as the reporting clients expect them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NecessityRow {
    pub id: Uuid,
    pub cardapio_id: i64,
    pub cardapio_nome: String,
    pub mes_referencia: i32,
    pub ano_referencia: i32,
    pub filial_id: i64,
    pub filial_nome: String,
    pub centro_custo_id: i64,
    pub centro_custo_nome: String,
    pub contrato_id: i64,
    pub contrato_nome: String,
    pub produto_comercial_id: i64,
    pub produto_comercial_nome: String,
    pub unidade_id: i64,
    pub unidade_nome: String,
    pub periodo_atendimento_id: i64,
    pub periodo_atendimento_nome: String,
    pub data: NaiveDate,
    pub prato_id: i64,
    pub prato_nome: String,
    pub produto_id: i64,
    pub produto_nome: String,
    pub produto_unidade_medida: String,
    #[schema(value_type = String, example = "0.100")]
    pub percapta: Decimal,
    #[schema(value_type = String, example = "250")]
    pub media_efetivos: Decimal,
    #[schema(value_type = String, example = "25.000")]
    pub quantidade: Decimal,
    pub ordem: i32,
    pub usuario_gerador_id: Option<i64>,
    pub data_geracao: DateTime<FixedOffset>,
}

impl From<necessity_record::Model> for NecessityRow {
    fn from(m: necessity_record::Model) -> Self {
        Self {
            id: m.id,
            cardapio_id: m.menu_id,
            cardapio_nome: m.menu_name,
            mes_referencia: m.reference_month,
            ano_referencia: m.reference_year,
            filial_id: m.branch_id,
            filial_nome: m.branch_name,
            centro_custo_id: m.cost_center_id,
            centro_custo_nome: m.cost_center_name,
            contrato_id: m.contract_id,
            contrato_nome: m.contract_name,
            produto_comercial_id: m.commercial_product_id,
            produto_comercial_nome: m.commercial_product_name,
            unidade_id: m.unit_id,
            unidade_nome: m.unit_name,
            periodo_atendimento_id: m.period_id,
            periodo_atendimento_nome: m.period_name,
            data: m.date,
            prato_id: m.dish_id,
            prato_nome: m.dish_name,
            produto_id: m.product_id,
            produto_nome: m.product_name,
            produto_unidade_medida: m.product_unit,
            percapta: m.per_capita.normalize(),
            media_efetivos: m.average_demand.normalize(),
            quantidade: with_scale(m.quantity, QUANTITY_SCALE),
            ordem: m.display_order,
            usuario_gerador_id: m.generated_by,
            data_geracao: m.generated_at,
        }
    }
}

/// Export row with display headers as keys, serialized in column order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExportRow {
    #[serde(rename = "NOME DO CARDÁPIO")]
    pub menu_name: String,
    #[serde(rename = "MÊS REF.")]
    pub reference_month: i32,
    #[serde(rename = "ANO")]
    pub reference_year: i32,
    #[serde(rename = "FILIAL")]
    pub branch_name: String,
    #[serde(rename = "CENTRO DE CUSTO")]
    pub cost_center_name: String,
    #[serde(rename = "CONTRATO")]
    pub contract_name: String,
    #[serde(rename = "TIPO DE CARDÁPIO")]
    pub commercial_product_name: String,
    #[serde(rename = "UNIDADES ESCOLARES")]
    pub unit_name: String,
    #[serde(rename = "PERÍODO")]
    pub period_name: String,
    /// dd/mm/yyyy
    #[serde(rename = "DATA")]
    pub date: String,
    #[serde(rename = "PRATO")]
    pub dish_name: String,
    #[serde(rename = "PRODUTO")]
    pub product_name: String,
    #[serde(rename = "PERCAPTA")]
    #[schema(value_type = String)]
    pub per_capita: Decimal,
    #[serde(rename = "MEDIA/EFETIVOS")]
    #[schema(value_type = String)]
    pub average_demand: Decimal,
    #[serde(rename = "QUANTIDADE")]
    #[schema(value_type = String)]
    pub quantity: Decimal,
    #[serde(rename = "ORDEM")]
    pub display_order: i32,
}

impl From<necessity_record::Model> for ExportRow {
    fn from(m: necessity_record::Model) -> Self {
        Self {
            menu_name: m.menu_name,
            reference_month: m.reference_month,
            reference_year: m.reference_year,
            branch_name: m.branch_name,
            cost_center_name: m.cost_center_name,
            contract_name: m.contract_name,
            commercial_product_name: m.commercial_product_name,
            unit_name: m.unit_name,
            period_name: m.period_name,
            date: m.date.format("%d/%m/%Y").to_string(),
            dish_name: m.dish_name,
            product_name: m.product_name,
            per_capita: m.per_capita.normalize(),
            average_demand: m.average_demand.normalize(),
            quantity: with_scale(m.quantity, QUANTITY_SCALE),
            display_order: m.display_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DbBackend, QueryTrait};

    fn record() -> necessity_record::Model {
        necessity_record::Model {
            id: Uuid::new_v4(),
            menu_id: 1,
            menu_name: "March menu".into(),
            reference_month: 3,
            reference_year: 2025,
            branch_id: 10,
            branch_name: "F1".into(),
            cost_center_id: 20,
            cost_center_name: "C1".into(),
            contract_id: 30,
            contract_name: "K1".into(),
            commercial_product_id: 0,
            commercial_product_name: String::new(),
            unit_id: 100,
            unit_name: "U1".into(),
            period_id: 1,
            period_name: "Lunch".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            dish_id: 500,
            dish_name: "Rice and Beans".into(),
            product_id: 9001,
            product_name: "Rice".into(),
            product_unit: "kg".into(),
            per_capita: dec!(0.100000),
            average_demand: dec!(250),
            quantity: dec!(25),
            display_order: 1,
            generated_by: Some(42),
            generated_at: Utc::now().into(),
        }
    }

    #[test]
    fn empty_filter_restricts_nothing() {
        let sql = filtered_query(&NecessityFilter::default())
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!sql.contains(r#""menu_id" ="#));
        assert!(!sql.contains(r#""date" >="#));
        assert!(sql.contains(r#"ORDER BY "necessity_records"."date" ASC"#));
    }

    #[test]
    fn filters_are_conjunctive_and_dates_inclusive() {
        let filter = NecessityFilter {
            cardapio_id: Some(1),
            produto_id: Some(9001),
            data_inicio: NaiveDate::from_ymd_opt(2025, 3, 10),
            data_fim: NaiveDate::from_ymd_opt(2025, 3, 12),
            ..Default::default()
        };
        let sql = filtered_query(&filter).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(r#""necessity_records"."menu_id" = 1"#));
        assert!(sql.contains(r#""necessity_records"."product_id" = 9001"#));
        assert!(sql.contains(r#""necessity_records"."date" >= '2025-03-10'"#));
        assert!(sql.contains(r#""necessity_records"."date" <= '2025-03-12'"#));
        assert!(!sql.contains(" OR "));
    }

    #[test]
    fn page_window_applies_defaults_and_cap() {
        let mut filter = NecessityFilter::default();
        assert_eq!(page_window(&filter, 50, 1000).unwrap(), (1, 50));

        filter.page = Some(3);
        filter.limit = Some(5000);
        assert_eq!(page_window(&filter, 50, 1000).unwrap(), (3, 1000));

        filter.page = Some(0);
        filter.limit = Some(0);
        assert_eq!(page_window(&filter, 50, 1000).unwrap(), (1, 50));
    }

    #[test]
    fn page_window_rejects_offsets_past_i64() {
        let mut filter = NecessityFilter {
            page: Some(u64::MAX),
            limit: Some(1000),
            ..Default::default()
        };
        assert!(matches!(
            page_window(&filter, 50, 1000),
            Err(ServiceError::ValidationError(_))
        ));

        // Largest page whose offset still fits
        filter.page = Some(i64::MAX as u64 / 1000 + 1);
        assert!(page_window(&filter, 50, 1000).is_ok());
        filter.page = Some(i64::MAX as u64 / 1000 + 2);
        assert!(page_window(&filter, 50, 1000).is_err());
    }

    #[test]
    fn export_row_uses_display_headers_in_column_order() {
        let value = serde_json::to_value(ExportRow::from(record())).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        // serde_json maps are sorted unless preserve_order is on, so compare as a set
        for header in [
            "NOME DO CARDÁPIO",
            "MÊS REF.",
            "ANO",
            "FILIAL",
            "CENTRO DE CUSTO",
            "CONTRATO",
            "TIPO DE CARDÁPIO",
            "UNIDADES ESCOLARES",
            "PERÍODO",
            "DATA",
            "PRATO",
            "PRODUTO",
            "PERCAPTA",
            "MEDIA/EFETIVOS",
            "QUANTIDADE",
            "ORDEM",
        ] {
            assert!(keys.iter().any(|k| k == header), "missing {header}");
        }
        assert_eq!(keys.len(), 16);
        assert_eq!(value["DATA"], "10/03/2025");
        assert_eq!(value["QUANTIDADE"], "25.000");
        assert_eq!(value["PERCAPTA"], "0.1");

        let text = serde_json::to_string(&ExportRow::from(record())).unwrap();
        let first = text.find("NOME DO CARDÁPIO").unwrap();
        let last = text.find("ORDEM").unwrap();
        assert!(first < last);
    }

    #[test]
    fn listed_row_keeps_three_decimal_quantity() {
        let row = NecessityRow::from(record());
        assert_eq!(row.quantidade.to_string(), "25.000");
        assert_eq!(row.filial_nome, "F1");
        assert_eq!(row.usuario_gerador_id, Some(42));
    }
}
