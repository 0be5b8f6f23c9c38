use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{map_error, map_query_rejection};
use crate::{with_timeline, AppState};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tl_core::types::UnifiedEvent;
use tl_core::validation::validate_timeline_query;
use tl_core::TimelineError;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, serde::Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogsQuery {
    /// Required.
    line_id: Option<String>,
    /// Required.
    eqp_id: Option<String>,
    sdwt_id: Option<String>,
    /// Comma separated subset of EQP, TIP, RACB, CTTTM, JIRA.
    log_types: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/logs", get(list_logs))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/logs",
    params(LogsQuery),
    responses(
        (status = 200, body = Vec<UnifiedEvent>),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn list_logs(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return map_query_rejection(&rejection, Some(correlation.0)).into_response();
        }
    };
    let query = match validate_timeline_query(
        query.line_id.as_deref(),
        query.eqp_id.as_deref(),
        query.sdwt_id.as_deref(),
        query.log_types.as_deref(),
    ) {
        Ok(query) => query,
        Err(err) => {
            return map_error(&TimelineError::from(err), Some(correlation.0)).into_response();
        }
    };
    match with_timeline(&state, move |timeline| timeline.events().list(&query)).await {
        Ok(events) => Json(events).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
