use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::common::{
    created_response, map_json_rejection, map_query_rejection, map_service_error,
    success_response, PaginatedResponse,
};
use crate::errors::ApiError;
use crate::services::necessity::{
    ExportRow, GenerateNecessityRequest, GenerationSummary, NecessityFilter, NecessityRow,
};
use crate::{AppState, ApiResponse};

/// Body of the JSON export
#[derive(Debug, Serialize, ToSchema)]
pub struct NecessityExport {
    pub data: Vec<ExportRow>,
    pub total: usize,
    /// RFC 3339 timestamp of the export
    pub exportado_em: String,
}

/// Creates the router for menu necessity endpoints
pub fn necessity_routes() -> Router<AppState> {
    Router::new()
        .route("/gerar-necessidade", post(generate_necessity))
        .route("/necessidades", get(list_necessities))
        .route("/necessidades/exportar/json", get(export_necessities_json))
}

/// Generate necessities for a menu and a (branch, cost center, contract) selection
///
/// Replaces every row previously generated for the same selection.
#[utoipa::path(
    post,
    path = "/api/v1/cardapios/gerar-necessidade",
    request_body = GenerateNecessityRequest,
    responses(
        (status = 201, description = "Necessity generated", body = ApiResponse<GenerationSummary>),
        (status = 400, description = "Unreadable body, or a required id is missing", body = crate::errors::ErrorResponse),
        (status = 404, description = "Menu not found or no eligible serving unit", body = crate::errors::ErrorResponse),
        (status = 500, description = "Generation failed and was rolled back", body = crate::errors::ErrorResponse),
        (status = 503, description = "Generation deadline exceeded", body = crate::errors::ErrorResponse)
    ),
    tag = "Necessities"
)]
pub async fn generate_necessity(
    State(state): State<AppState>,
    payload: Result<Json<GenerateNecessityRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(map_json_rejection)?;
    let summary = state
        .services
        .necessity
        .generate(payload)
        .await
        .map_err(map_service_error)?;

    info!(rows = summary.total_registros, "Necessity generation request completed");
    Ok(created_response(ApiResponse::success(summary)))
}

/// List generated necessities
#[utoipa::path(
    get,
    path = "/api/v1/cardapios/necessidades",
    params(NecessityFilter),
    responses(
        (status = 200, description = "Paginated necessities", body = ApiResponse<PaginatedResponse<NecessityRow>>),
        (status = 400, description = "Malformed filter", body = crate::errors::ErrorResponse)
    ),
    tag = "Necessities"
)]
pub async fn list_necessities(
    State(state): State<AppState>,
    filter: Result<Query<NecessityFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter.map_err(map_query_rejection)?;
    let page = state
        .services
        .necessity
        .list(filter)
        .await
        .map_err(map_service_error)?;

    let body = PaginatedResponse::new(page.rows, page.page, page.limit, page.total);
    Ok(success_response(ApiResponse::success(body)))
}

/// Export every matching necessity with report column headers
#[utoipa::path(
    get,
    path = "/api/v1/cardapios/necessidades/exportar/json",
    params(NecessityFilter),
    responses(
        (status = 200, description = "All matching necessities, relabelled", body = ApiResponse<NecessityExport>),
        (status = 400, description = "Malformed filter", body = crate::errors::ErrorResponse)
    ),
    tag = "Necessities"
)]
pub async fn export_necessities_json(
    State(state): State<AppState>,
    filter: Result<Query<NecessityFilter>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(filter) = filter.map_err(map_query_rejection)?;
    let data = state
        .services
        .necessity
        .export(filter)
        .await
        .map_err(map_service_error)?;

    let export = NecessityExport {
        total: data.len(),
        data,
        exportado_em: Utc::now().to_rfc3339(),
    };
    Ok(success_response(ApiResponse::success(export)))
}
