use crate::sources::LinkTemplates;
use crate::types::enums::LogType;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One normalized entry of an equipment timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedEvent {
    pub id: String,
    pub line_id: String,
    pub sdwt_id: Option<String>,
    pub eqp_id: String,
    pub log_type: LogType,
    pub event_type: String,
    pub event_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub operator: Option<String>,
    pub comment: Option<String>,
    pub url: Option<String>,
    /// Seconds between `eventTime` and `endTime`; null while the event is open.
    pub duration: Option<f64>,
}

/// A source record projected onto the shared columns, before ids, links and
/// durations are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub log_type: LogType,
    pub local_id: String,
    pub line_id: String,
    pub sdwt_id: Option<String>,
    pub eqp_id: String,
    pub event_type: String,
    pub event_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub operator: Option<String>,
    pub comment: Option<String>,
    pub link_key: Option<String>,
}

impl UnifiedEvent {
    pub fn from_row(row: SourceRow, links: &LinkTemplates) -> Self {
        let url = row
            .link_key
            .as_deref()
            .and_then(|key| links.link_for(row.log_type, key));
        let duration = row
            .end_time
            .map(|end| duration_seconds(end - row.event_time));
        Self {
            id: format!("{}-{}", row.log_type, row.local_id),
            line_id: row.line_id,
            sdwt_id: row.sdwt_id,
            eqp_id: row.eqp_id,
            log_type: row.log_type,
            event_type: row.event_type,
            event_time: row.event_time,
            end_time: row.end_time,
            operator: row.operator,
            comment: row.comment,
            url,
            duration,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn duration_seconds(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    }
}
