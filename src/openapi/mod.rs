use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foodplan API",
        version = "0.1.0",
        description = r#"
# Food-service planning API

Generates and reports the raw-product necessities of a menu.

## Generation

`POST /cardapios/gerar-necessidade` computes, for every serving unit of a
contract, every attendance period, every planned dish and every recipe
product, `quantity = round(average servings x per capita, 3)` and replaces
the rows stored for the same (menu, branch, cost center, contract).

## Reading

`GET /cardapios/necessidades` lists rows with conjunctive filters and
`page`/`limit` pagination (default 50, max 1000).
`GET /cardapios/necessidades/exportar/json` returns the same rows without a
cap, keyed by report column headers.

## Error Handling

```json
{
  "error": "Not Found",
  "message": "Not found: Menu 9 not found",
  "timestamp": "2025-03-10T10:30:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Necessities", description = "Menu necessity generation and reporting"),
        (name = "Health", description = "Health check endpoints")
    ),
    paths(
        crate::handlers::necessities::generate_necessity,
        crate::handlers::necessities::list_necessities,
        crate::handlers::necessities::export_necessities_json,
    ),
    components(
        schemas(
            crate::services::necessity::GenerateNecessityRequest,
            crate::services::necessity::GenerationSummary,
            crate::services::necessity::GenerationKey,
            crate::services::necessity::NecessityRow,
            crate::services::necessity::ExportRow,
            crate::handlers::necessities::NecessityExport,
            crate::handlers::common::PaginationMeta,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

/// Serves the generated document at `/api-docs/openapi.json`
pub fn openapi_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDocV1::openapi()) }),
    )
}
