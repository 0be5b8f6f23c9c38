use crate::{with_timeline, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tl_core::types::{HealthReport, UnhealthyReport};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}

#[utoipa::path(get, path = "/", responses((status = 200, body = ServiceInfo)))]
pub(crate) async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "EQP Timeline API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, body = HealthReport),
        (status = 500, body = UnhealthyReport)
    )
)]
pub(crate) async fn health(State(state): State<AppState>) -> Response {
    let result = with_timeline(&state, |timeline| {
        timeline.health(Utc::now()).map_err(Into::into)
    })
    .await;
    match result {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            let report = UnhealthyReport {
                status: "unhealthy".to_string(),
                error: err.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(report)).into_response()
        }
    }
}
