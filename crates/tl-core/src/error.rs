use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required parameter: {name}")]
    MissingParam { name: &'static str },
    #[error("invalid parameter {name}: {message}")]
    InvalidParam { name: &'static str, message: String },
    #[error("malformed query string: {message}")]
    MalformedQuery { message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Equipment {eqp_id} not found in line {line_id}")]
    EquipmentNotFound { eqp_id: String, line_id: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("database connection failed: {message}")]
    Connection { message: String },
    #[error("database call timed out after {seconds}s")]
    Timeout { seconds: u64 },
    #[error("query failed: {message}")]
    Query { message: String },
    #[error("invalid row: {message}")]
    InvalidRow { message: String },
}

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
