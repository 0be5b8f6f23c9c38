use chrono::{DateTime, NaiveDateTime};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Row};
use thiserror::Error;
use tl_core::error::StoreError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("missing value in column {column}")]
    MissingValue { column: &'static str },
    #[error("invalid enum value: {value}")]
    InvalidEnum { value: String },
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::InvalidRow {
            message: err.to_string(),
        }
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a stored timestamp. Offset-qualified values are normalized to UTC.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, DbError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}

pub fn query_error(err: rusqlite::Error) -> StoreError {
    tracing::warn!(error = %err, "store query failed");
    StoreError::Query {
        message: err.to_string(),
    }
}

pub fn row_error(err: rusqlite::Error) -> StoreError {
    StoreError::InvalidRow {
        message: err.to_string(),
    }
}

/// Reads a non-NULL value by column name.
pub fn required<T>(row: &Row<'_>, column: &'static str) -> Result<T, StoreError>
where
    T: rusqlite::types::FromSql,
{
    let value: Option<T> = row.get(column).map_err(row_error)?;
    value.ok_or_else(|| DbError::MissingValue { column }.into())
}

pub fn optional<T>(row: &Row<'_>, column: &'static str) -> Result<Option<T>, StoreError>
where
    T: rusqlite::types::FromSql,
{
    row.get(column).map_err(row_error)
}

/// Named parameters collected by the query builders. Values are always bound,
/// never formatted into the statement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedParams(Vec<(&'static str, String)>);

impl NamedParams {
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn as_sql(&self) -> Vec<(&str, &dyn ToSql)> {
        self.0
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect()
    }
}

/// Runs a single-column query and collects its text values.
pub fn query_strings(
    conn: &Connection,
    sql: &str,
    params: &NamedParams,
) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(sql).map_err(query_error)?;
    let mut rows = stmt.query(params.as_sql().as_slice()).map_err(query_error)?;
    let mut values = Vec::new();
    while let Some(row) = rows.next().map_err(query_error)? {
        let value: Option<String> = row.get(0).map_err(row_error)?;
        values.push(value.ok_or(DbError::MissingValue { column: "value" })?);
    }
    tracing::debug!(
        params = ?params.names().collect::<Vec<_>>(),
        rows = values.len(),
        "listed distinct values"
    );
    Ok(values)
}
