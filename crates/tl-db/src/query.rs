//! Statement builders. Identifiers come from static catalogs; every caller
//! supplied value is a named parameter.

use crate::util::NamedParams;
use tl_core::sources::{EQP_COLUMN, EventTypeColumn, LINE_COLUMN, SourceSpec};
use tl_core::types::{EquipmentFilter, TimelineQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: NamedParams,
}

/// Output columns of every branch of the timeline union. Branch projections
/// are aliased from this list and rows are read back by these names.
pub const TIMELINE_COLUMNS: [&str; 11] = [
    "log_type",
    "local_id",
    "line_id",
    "sdwt_id",
    "eqp_id",
    "event_type",
    "event_time",
    "end_time",
    "operator",
    "comment",
    "link_key",
];

/// Builds one `UNION ALL` statement over the sources selected by `query`.
/// Returns `None` when no catalog source is selected.
pub fn timeline_query(query: &TimelineQuery, sources: &[SourceSpec]) -> Option<BoundQuery> {
    let mut uses_sdwt = false;
    let branches: Vec<String> = sources
        .iter()
        .filter(|spec| query.log_types.contains(&spec.log_type))
        .map(|spec| {
            let sdwt_filter = match (query.sdwt_id.as_ref(), spec.sdwt_column) {
                (Some(_), Some(column)) => {
                    uses_sdwt = true;
                    format!(" AND {column} = :sdwt")
                }
                _ => String::new(),
            };
            source_branch(spec, &sdwt_filter)
        })
        .collect();
    if branches.is_empty() {
        return None;
    }

    let mut sql = branches.join("\nUNION ALL\n");
    sql.push_str("\nORDER BY event_time DESC");

    let mut params = NamedParams::default();
    params.push(":line", query.line_id.clone());
    params.push(":eqp", query.eqp_id.clone());
    if uses_sdwt {
        if let Some(sdwt_id) = &query.sdwt_id {
            params.push(":sdwt", sdwt_id.clone());
        }
    }
    Some(BoundQuery { sql, params })
}

fn source_branch(spec: &SourceSpec, sdwt_filter: &str) -> String {
    let event_type = match spec.event_type {
        EventTypeColumn::Column(column) => column.to_string(),
        EventTypeColumn::Literal(value) => format!("'{value}'"),
    };
    let link_key = spec
        .link_column
        .map_or_else(|| "NULL".to_string(), |column| format!("CAST({column} AS TEXT)"));
    let expressions = [
        format!("'{}'", spec.log_type),
        "CAST(id AS TEXT)".to_string(),
        LINE_COLUMN.to_string(),
        spec.sdwt_column.unwrap_or("NULL").to_string(),
        EQP_COLUMN.to_string(),
        event_type,
        "event_time".to_string(),
        "end_time".to_string(),
        "operator".to_string(),
        "comment".to_string(),
        link_key,
    ];
    let projection = expressions
        .iter()
        .zip(TIMELINE_COLUMNS)
        .map(|(expr, alias)| format!("{expr} AS {alias}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {projection} FROM {table} WHERE {LINE_COLUMN} = :line AND {EQP_COLUMN} = :eqp{sdwt_filter}",
        table = spec.table,
    )
}

/// Distinct equipment of a line, optionally narrowed by sub-division and
/// process group.
pub fn equipment_query(filter: &EquipmentFilter) -> BoundQuery {
    let mut sql = String::from(
        "SELECT DISTINCT eqp_cb, line_id, sdwt_prod, prc_group FROM sdwt_eqp WHERE line_id = :line",
    );
    let mut params = NamedParams::default();
    params.push(":line", filter.line_id.clone());
    if let Some(sdwt_id) = &filter.sdwt_id {
        sql.push_str(" AND sdwt_prod = :sdwt");
        params.push(":sdwt", sdwt_id.clone());
    }
    if let Some(prc_group) = &filter.prc_group {
        sql.push_str(" AND prc_group = :prc_group");
        params.push(":prc_group", prc_group.clone());
    }
    sql.push_str(" ORDER BY eqp_cb");
    BoundQuery { sql, params }
}
