use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{map_error, map_query_rejection};
use crate::{with_timeline, AppState};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use tl_core::types::{EquipmentScope, EquipmentSummary, LineSummary, PrcGroupSummary, SdwtSummary};
use tl_core::validation::{require_param, validate_equipment_filter};
use tl_core::TimelineError;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, serde::Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LineQuery {
    line_id: Option<String>,
}

#[derive(Debug, serde::Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PrcGroupQuery {
    line_id: Option<String>,
    sdwt_id: Option<String>,
}

#[derive(Debug, serde::Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    line_id: Option<String>,
    sdwt_id: Option<String>,
    prc_group: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/lines", get(list_lines))
        .route("/sdwts", get(list_sdwts))
        .route("/prc-groups", get(list_prc_groups))
        .route("/equipments", get(list_equipments))
        .route("/equipment-info/{eqp_id}", get(equipment_info))
        .with_state(state)
}

fn respond<T: serde::Serialize>(
    result: Result<T, TimelineError>,
    correlation: CorrelationId,
) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}

fn accept<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation: &CorrelationId,
) -> Result<T, Response> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| {
            map_query_rejection(&rejection, Some(correlation.0.clone())).into_response()
        })
}

#[utoipa::path(
    get,
    path = "/lines",
    responses((status = 200, body = Vec<LineSummary>))
)]
pub(crate) async fn list_lines(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let result = with_timeline(&state, |timeline| timeline.scopes().lines()).await;
    respond(result, correlation)
}

#[utoipa::path(
    get,
    path = "/sdwts",
    params(LineQuery),
    responses((status = 200, body = Vec<SdwtSummary>))
)]
pub(crate) async fn list_sdwts(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    query: Result<Query<LineQuery>, QueryRejection>,
) -> Response {
    let query = match accept(query, &correlation) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let line_id = match require_param("lineId", query.line_id.as_deref()) {
        Ok(value) => value,
        Err(err) => return respond::<()>(Err(err.into()), correlation),
    };
    let result = with_timeline(&state, move |timeline| timeline.scopes().sdwts(&line_id)).await;
    respond(result, correlation)
}

#[utoipa::path(
    get,
    path = "/prc-groups",
    params(PrcGroupQuery),
    responses((status = 200, body = Vec<PrcGroupSummary>))
)]
pub(crate) async fn list_prc_groups(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    query: Result<Query<PrcGroupQuery>, QueryRejection>,
) -> Response {
    let query = match accept(query, &correlation) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let params = require_param("lineId", query.line_id.as_deref()).and_then(|line_id| {
        require_param("sdwtId", query.sdwt_id.as_deref()).map(|sdwt_id| (line_id, sdwt_id))
    });
    let (line_id, sdwt_id) = match params {
        Ok(value) => value,
        Err(err) => return respond::<()>(Err(err.into()), correlation),
    };
    let result = with_timeline(&state, move |timeline| {
        timeline.scopes().prc_groups(&line_id, &sdwt_id)
    })
    .await;
    respond(result, correlation)
}

#[utoipa::path(
    get,
    path = "/equipments",
    params(EquipmentQuery),
    responses((status = 200, body = Vec<EquipmentSummary>))
)]
pub(crate) async fn list_equipments(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    query: Result<Query<EquipmentQuery>, QueryRejection>,
) -> Response {
    let query = match accept(query, &correlation) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let filter = match validate_equipment_filter(
        query.line_id.as_deref(),
        query.sdwt_id.as_deref(),
        query.prc_group.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(err) => return respond::<()>(Err(err.into()), correlation),
    };
    let result = with_timeline(&state, move |timeline| timeline.scopes().equipments(&filter)).await;
    respond(result, correlation)
}

#[utoipa::path(
    get,
    path = "/equipment-info/{eqp_id}",
    params(("eqp_id" = String, Path, description = "Equipment id"), LineQuery),
    responses(
        (status = 200, body = EquipmentScope),
        (status = 404, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn equipment_info(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(eqp_id): Path<String>,
    query: Result<Query<LineQuery>, QueryRejection>,
) -> Response {
    let query = match accept(query, &correlation) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let line_id = match require_param("lineId", query.line_id.as_deref()) {
        Ok(value) => value,
        Err(err) => return respond::<()>(Err(err.into()), correlation),
    };
    let result = with_timeline(&state, move |timeline| {
        timeline.scopes().equipment_info(&eqp_id, &line_id)
    })
    .await;
    respond(result, correlation)
}
