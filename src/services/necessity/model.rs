use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;

/// Identity of a generation run. Every row written by a run carries this key,
/// and the next run for the same key replaces all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct GenerationKey {
    #[serde(rename = "cardapio_id")]
    pub menu_id: i64,
    #[serde(rename = "filial_id")]
    pub branch_id: i64,
    #[serde(rename = "centro_custo_id")]
    pub cost_center_id: i64,
    #[serde(rename = "contrato_id")]
    pub contract_id: i64,
}

impl fmt::Display for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "menu {}, branch {}, cost center {}, contract {}",
            self.menu_id, self.branch_id, self.cost_center_id, self.contract_id
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdInput {
    Number(i64),
    Text(String),
}

/// Accepts ids sent as JSON numbers or numeric strings; blank strings count as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdInput::Number(id)) => Ok(Some(id)),
        Some(IdInput::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid id {:?}", raw)))
        }
    }
}

/// Body of `POST /cardapios/gerar-necessidade`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct GenerateNecessityRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(example = 7)]
    pub cardapio_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(example = 2)]
    pub filial_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(example = 3)]
    pub centro_custo_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(example = 11)]
    pub contrato_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub usuario_id: Option<i64>,
}

/// Validated generation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationCommand {
    pub key: GenerationKey,
    pub generated_by: Option<i64>,
}

fn present(id: Option<i64>) -> Option<i64> {
    // zero or negative ids count as absent
    id.filter(|v| *v > 0)
}

impl GenerateNecessityRequest {
    pub fn into_command(self) -> Result<GenerationCommand, ServiceError> {
        let menu_id = present(self.cardapio_id)
            .ok_or_else(|| ServiceError::ValidationError("cardapio_id is required".to_string()))?;

        match (
            present(self.filial_id),
            present(self.centro_custo_id),
            present(self.contrato_id),
        ) {
            (Some(branch_id), Some(cost_center_id), Some(contract_id)) => Ok(GenerationCommand {
                key: GenerationKey {
                    menu_id,
                    branch_id,
                    cost_center_id,
                    contract_id,
                },
                generated_by: present(self.usuario_id),
            }),
            _ => Err(ServiceError::ValidationError(
                "filial_id, centro_custo_id and contrato_id are required".to_string(),
            )),
        }
    }
}

/// Menu fields copied onto every generated row.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuHeader {
    pub id: i64,
    pub name: String,
    pub reference_month: i32,
    pub reference_year: i32,
}

/// Serving unit that passed contract and menu assignment checks, with the
/// display names resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibleUnit {
    pub unit_id: i64,
    pub unit_name: String,
    pub branch_id: i64,
    pub branch_name: String,
    pub cost_center_id: i64,
    pub cost_center_name: String,
    pub contract_id: i64,
    pub contract_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub id: i64,
    pub name: String,
}

/// One dish of the menu plan. `commercial_product_id` is 0 and the name is
/// empty when the entry has no commercial product override.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub date: NaiveDate,
    pub dish_id: i64,
    pub dish_name: String,
    pub commercial_product_id: i64,
    pub commercial_product_name: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BomLine {
    pub product_id: i64,
    pub product_name: String,
    pub unit_symbol: String,
    pub per_capita: Decimal,
}

/// A computed necessity row before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNecessity {
    pub key: GenerationKey,
    pub menu_name: String,
    pub reference_month: i32,
    pub reference_year: i32,
    pub branch_name: String,
    pub cost_center_name: String,
    pub contract_name: String,
    pub commercial_product_id: i64,
    pub commercial_product_name: String,
    pub unit_id: i64,
    pub unit_name: String,
    pub period_id: i64,
    pub period_name: String,
    pub date: NaiveDate,
    pub dish_id: i64,
    pub dish_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub product_unit: String,
    pub per_capita: Decimal,
    pub average_demand: Decimal,
    pub quantity: Decimal,
    pub display_order: i32,
}

/// Returned by a successful generation run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationSummary {
    #[schema(example = "Necessity generated successfully")]
    pub message: String,
    pub total_registros: u64,
    pub filtros: GenerationKey,
}

/// Conjunctive filters shared by the list and export endpoints. Dates are
/// inclusive on both ends.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NecessityFilter {
    pub cardapio_id: Option<i64>,
    pub filial_id: Option<i64>,
    pub centro_custo_id: Option<i64>,
    pub contrato_id: Option<i64>,
    pub unidade_id: Option<i64>,
    pub periodo_atendimento_id: Option<i64>,
    pub produto_id: Option<i64>,
    /// yyyy-mm-dd
    pub data_inicio: Option<NaiveDate>,
    /// yyyy-mm-dd
    pub data_fim: Option<NaiveDate>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn full_request() -> GenerateNecessityRequest {
        GenerateNecessityRequest {
            cardapio_id: Some(7),
            filial_id: Some(2),
            centro_custo_id: Some(3),
            contrato_id: Some(11),
            usuario_id: Some(42),
        }
    }

    #[test]
    fn ids_may_arrive_as_numeric_strings() {
        let req: GenerateNecessityRequest = serde_json::from_value(serde_json::json!({
            "cardapio_id": "7",
            "filial_id": 2,
            "centro_custo_id": " 3 ",
            "contrato_id": "11",
            "usuario_id": ""
        }))
        .unwrap();
        let cmd = req.into_command().unwrap();
        assert_eq!(cmd.key.menu_id, 7);
        assert_eq!(cmd.key.cost_center_id, 3);
        assert_eq!(cmd.generated_by, None);
    }

    #[test]
    fn non_numeric_id_fails_to_decode() {
        let decoded = serde_json::from_value::<GenerateNecessityRequest>(serde_json::json!({
            "cardapio_id": "seven"
        }));
        assert!(decoded.is_err());

        let nulls: GenerateNecessityRequest =
            serde_json::from_value(serde_json::json!({"cardapio_id": null})).unwrap();
        assert_eq!(nulls.cardapio_id, None);
    }

    #[test]
    fn complete_request_becomes_command() {
        let cmd = full_request().into_command().unwrap();
        assert_eq!(
            cmd.key,
            GenerationKey {
                menu_id: 7,
                branch_id: 2,
                cost_center_id: 3,
                contract_id: 11
            }
        );
        assert_eq!(cmd.generated_by, Some(42));
    }

    #[test]
    fn missing_menu_is_reported_first() {
        let req = GenerateNecessityRequest {
            cardapio_id: None,
            filial_id: None,
            ..full_request()
        };
        assert_matches!(
            req.into_command(),
            Err(ServiceError::ValidationError(msg)) if msg.contains("cardapio_id")
        );
    }

    #[test]
    fn any_missing_selection_id_is_rejected() {
        for req in [
            GenerateNecessityRequest { filial_id: None, ..full_request() },
            GenerateNecessityRequest { centro_custo_id: Some(0), ..full_request() },
            GenerateNecessityRequest { contrato_id: None, ..full_request() },
        ] {
            assert_matches!(req.into_command(), Err(ServiceError::ValidationError(_)));
        }
    }

    #[test]
    fn user_id_is_optional() {
        let req = GenerateNecessityRequest { usuario_id: None, ..full_request() };
        assert_eq!(req.into_command().unwrap().generated_by, None);
    }
}
