use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tl_core::error::{ScopeError, StoreError, ValidationError};
use tl_core::TimelineError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
}

pub fn map_error(
    err: &TimelineError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        TimelineError::Validation(validation) => map_validation_error(validation),
        TimelineError::Scope(scope) => map_scope_error(scope),
        TimelineError::Store(store) => map_store_error(store),
        TimelineError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
    };

    if status.is_server_error() {
        tracing::error!(code, correlation_id = ?correlation_id, "{message}");
    } else {
        tracing::debug!(code, correlation_id = ?correlation_id, "{message}");
    }

    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            correlation_id,
        }),
    )
}

/// Query strings axum cannot deserialize get the same envelope as any other
/// invalid input.
pub fn map_query_rejection(
    rejection: &QueryRejection,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let err = TimelineError::from(ValidationError::MalformedQuery {
        message: rejection.body_text(),
    });
    map_error(&err, correlation_id)
}

fn map_validation_error(err: &ValidationError) -> (StatusCode, &'static str, String) {
    match err {
        ValidationError::MissingParam { .. }
        | ValidationError::InvalidParam { .. }
        | ValidationError::MalformedQuery { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
    }
}

fn map_scope_error(err: &ScopeError) -> (StatusCode, &'static str, String) {
    match err {
        ScopeError::EquipmentNotFound { .. } => {
            (StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
    }
}

fn map_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "timeout", err.to_string()),
        StoreError::Connection { .. } | StoreError::Query { .. } | StoreError::InvalidRow { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            err.to_string(),
        ),
    }
}
