pub mod error;
pub mod health;
pub mod logs;
pub mod scopes;

use crate::middleware::correlation::correlation_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router(state.clone()))
        .merge(scopes::router(state.clone()))
        .merge(logs::router(state))
        .merge(openapi::router())
        .layer(middleware::from_fn(correlation_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
