use utoipa::OpenApi;

use crate::routes::error::ErrorEnvelope;
use crate::routes::health::ServiceInfo;
use crate::routes::logs::LogsQuery;
use crate::routes::scopes::{EquipmentQuery, LineQuery, PrcGroupQuery};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tl_core::types::{
    EquipmentScope, EquipmentSummary, HealthReport, LineSummary, LogType, PrcGroupSummary,
    SdwtSummary, UnhealthyReport, UnifiedEvent,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "EQP Timeline API"),
    paths(
        crate::routes::health::root,
        crate::routes::health::health,
        crate::routes::scopes::list_lines,
        crate::routes::scopes::list_sdwts,
        crate::routes::scopes::list_prc_groups,
        crate::routes::scopes::list_equipments,
        crate::routes::scopes::equipment_info,
        crate::routes::logs::list_logs
    ),
    components(schemas(
        UnifiedEvent,
        LogType,
        LineSummary,
        SdwtSummary,
        PrcGroupSummary,
        EquipmentSummary,
        EquipmentScope,
        HealthReport,
        UnhealthyReport,
        ServiceInfo,
        ErrorEnvelope,
        LogsQuery,
        LineQuery,
        PrcGroupQuery,
        EquipmentQuery
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    let html = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>EQP Timeline API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#;
    axum::response::Html(html)
}
