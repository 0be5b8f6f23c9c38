use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use ulid::Ulid;

#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

pub const HEADER_NAME: &str = "x-correlation-id";
const MAX_LEN: usize = 128;

impl CorrelationId {
    /// Reuses a caller-supplied id when it is printable and at most
    /// `MAX_LEN` bytes after trimming. Otherwise mints `corr_<ULID>`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let supplied = headers
            .get(HEADER_NAME)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty() && value.len() <= MAX_LEN);
        match supplied {
            Some(value) => Self(value.to_string()),
            None => Self(format!("corr_{}", Ulid::new())),
        }
    }
}

/// Runs the request inside a span carrying its correlation id, so store and
/// error logs can be tied back to the response header.
pub async fn correlation_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = CorrelationId::from_headers(request.headers());
    let span = tracing::info_span!(
        "request",
        correlation_id = %id.0,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let header = HeaderValue::from_str(&id.0).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).instrument(span).await;
    if let Some(value) = header {
        response.headers_mut().insert(HEADER_NAME, value);
    }
    response
}
