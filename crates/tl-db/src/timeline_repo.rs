use crate::query::{timeline_query, TIMELINE_COLUMNS};
use crate::util::{optional, parse_timestamp, query_error, required, DbError};
use rusqlite::Connection;
use tl_core::error::StoreError;
use tl_core::events::TimelineRepository;
use tl_core::sources::{SOURCES, SourceSpec};
use tl_core::types::{LogType, SourceRow, TimelineQuery};

pub struct TimelineRepo<'a> {
    pub conn: &'a Connection,
    sources: &'a [SourceSpec],
}

impl<'a> TimelineRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::with_sources(conn, &SOURCES)
    }

    pub fn with_sources(conn: &'a Connection, sources: &'a [SourceSpec]) -> Self {
        Self { conn, sources }
    }
}

impl TimelineRepository for TimelineRepo<'_> {
    fn source_rows(&self, query: &TimelineQuery) -> Result<Vec<SourceRow>, StoreError> {
        let Some(bound) = timeline_query(query, self.sources) else {
            return Ok(Vec::new());
        };
        tracing::debug!(
            line_id = %query.line_id,
            eqp_id = %query.eqp_id,
            sdwt_id = ?query.sdwt_id,
            branches = query.log_types.len(),
            params = ?bound.params.names().collect::<Vec<_>>(),
            "running timeline union"
        );
        let mut stmt = self.conn.prepare(&bound.sql).map_err(query_error)?;
        let mut rows = stmt
            .query(bound.params.as_sql().as_slice())
            .map_err(query_error)?;
        let mut source_rows = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            source_rows.push(map_source_row(row)?);
        }
        tracing::debug!(rows = source_rows.len(), "timeline union finished");
        Ok(source_rows)
    }
}

fn map_source_row(row: &rusqlite::Row<'_>) -> Result<SourceRow, StoreError> {
    let [
        log_type,
        local_id,
        line_id,
        sdwt_id,
        eqp_id,
        event_type,
        event_time,
        end_time,
        operator,
        comment,
        link_key,
    ] = TIMELINE_COLUMNS;

    let tag: String = required(row, log_type)?;
    let tag = tag
        .parse::<LogType>()
        .map_err(|err| DbError::InvalidEnum { value: err.0 })?;
    let start: String = required(row, event_time)?;
    let end: Option<String> = optional(row, end_time)?;

    Ok(SourceRow {
        log_type: tag,
        local_id: required(row, local_id)?,
        line_id: required(row, line_id)?,
        sdwt_id: optional(row, sdwt_id)?,
        eqp_id: required(row, eqp_id)?,
        event_type: required(row, event_type)?,
        event_time: parse_timestamp(&start)?,
        end_time: end
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_timestamp)
            .transpose()?,
        operator: optional(row, operator)?,
        comment: optional(row, comment)?,
        link_key: optional(row, link_key)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use tl_core::sources::LinkTemplates;
    use tl_core::timeline::merge_rows;
    use tl_core::validation::validate_timeline_query;

    fn insert(conn: &Connection, table: &str, columns: &str, values: &str) -> i64 {
        conn.execute(&format!("INSERT INTO {table} ({columns}) VALUES ({values})"), [])
            .unwrap();
        conn.last_insert_rowid()
    }

    fn status(conn: &Connection, eqp: &str, sdwt: &str, start: &str, end: Option<&str>) -> i64 {
        let end = end.map_or("NULL".to_string(), |value| format!("'{value}'"));
        insert(
            conn,
            "eqp_status_hist",
            "line_id, sdwt_prod, eqp_cb, status_type, event_time, end_time, operator, comment",
            &format!("'L1', '{sdwt}', '{eqp}', 'RUN', '{start}', {end}, 'kim', 'ok'"),
        )
    }

    fn seed_every_source(conn: &Connection) {
        status(conn, "EQP01", "S1", "2024-01-01 00:00:00", Some("2024-01-01 01:30:00"));
        insert(
            conn,
            "gpm_tip_hist",
            "line_id, sdwt_prod, eqp_cb, tip_type, event_time",
            "'L1', 'S1', 'EQP01', 'PM', '2024-01-02 00:00:00'",
        );
        insert(
            conn,
            "racb_list",
            "line_id, sdwt_prod, eqp_cb, event_time, end_time",
            "'L1', 'S2', 'EQP01', '2024-01-03 00:00:00', '2024-01-03 00:00:10'",
        );
        insert(
            conn,
            "ctttm_log_hist",
            "line_id, sdwt_prod, eqp_cb, ctttm_type, event_time",
            "'L1', 'S1', 'EQP01', 'CHAMBER', '2024-01-04T00:00:00'",
        );
        insert(
            conn,
            "jira_issue_hist",
            "line_id, sdwt_prod, eqp_cb, issue_key, issue_status, event_time",
            "'L1', 'S1', 'EQP01', 'ABC-1', 'Open', '2024-01-05 00:00:00'",
        );
    }

    fn fetch(conn: &Connection, sdwt: Option<&str>, log_types: Option<&str>) -> Vec<SourceRow> {
        let query = validate_timeline_query(Some("L1"), Some("EQP01"), sdwt, log_types).unwrap();
        TimelineRepo::new(conn).source_rows(&query).unwrap()
    }

    #[test]
    fn closed_status_event_has_row_id_and_duration() {
        let conn = with_test_db().unwrap();
        let row_id = status(&conn, "EQP01", "S1", "2024-01-01T00:00:00", Some("2024-01-01T01:30:00"));

        let events = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, format!("EQP-{row_id}"));
        assert_eq!(events[0].duration, Some(5400.0));
        assert_eq!(events[0].operator.as_deref(), Some("kim"));
        assert_eq!(events[0].url, None);
    }

    #[test]
    fn jira_issue_links_to_browse_page() {
        let conn = with_test_db().unwrap();
        insert(
            &conn,
            "jira_issue_hist",
            "line_id, sdwt_prod, eqp_cb, issue_key, issue_status, event_time",
            "'L1', 'S1', 'EQP01', 'ABC-1', 'In Progress', '2024-01-01 00:00:00'",
        );

        let events = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].log_type, LogType::Jira);
        assert_eq!(events[0].event_type, "In Progress");
        assert!(events[0].url.as_deref().unwrap().ends_with("/browse/ABC-1"));
        assert_eq!(events[0].duration, None);
    }

    #[test]
    fn every_source_contributes_its_rows() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);

        let events = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        let types: Vec<LogType> = events.iter().map(|event| event.log_type).collect();
        assert_eq!(
            types,
            vec![LogType::Jira, LogType::Ctttm, LogType::Racb, LogType::Tip, LogType::Eqp]
        );
        let racb = &events[2];
        assert_eq!(racb.event_type, "RACB");
        assert_eq!(racb.duration, Some(10.0));
        assert!(racb.url.as_deref().unwrap().starts_with("https://racb.example.com/alarm/"));
        let tip = &events[3];
        assert_eq!(tip.id, "TIP-1");
        assert_eq!(tip.url.as_deref(), Some("https://tip.example.com/issue/1"));
    }

    #[test]
    fn ids_are_unique_when_local_ids_collide_across_sources() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);

        let events = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        let mut ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn other_equipment_and_lines_are_excluded() {
        let conn = with_test_db().unwrap();
        status(&conn, "EQP02", "S1", "2024-01-01 00:00:00", None);
        insert(
            &conn,
            "eqp_status_hist",
            "line_id, sdwt_prod, eqp_cb, status_type, event_time",
            "'L2', 'S1', 'EQP01', 'IDLE', '2024-01-01 00:00:00'",
        );

        assert!(fetch(&conn, None, None).is_empty());
    }

    #[test]
    fn sdwt_filter_narrows_sources() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);

        let rows = fetch(&conn, Some("S2"), None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].log_type, LogType::Racb);
    }

    #[test]
    fn sdwt_filter_leaves_sources_without_the_column_unfiltered() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);
        let mut sources = SOURCES;
        sources[3].sdwt_column = None;

        let query = validate_timeline_query(Some("L1"), Some("EQP01"), Some("S2"), None).unwrap();
        let rows = TimelineRepo::with_sources(&conn, &sources)
            .source_rows(&query)
            .unwrap();
        let mut types: Vec<LogType> = rows.iter().map(|row| row.log_type).collect();
        types.sort();
        assert_eq!(types, vec![LogType::Racb, LogType::Ctttm]);
        let ctttm = rows.iter().find(|row| row.log_type == LogType::Ctttm).unwrap();
        assert_eq!(ctttm.sdwt_id, None);
    }

    #[test]
    fn log_type_selection_limits_sources() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);

        let rows = fetch(&conn, None, Some("TIP,JIRA"));
        let mut types: Vec<LogType> = rows.iter().map(|row| row.log_type).collect();
        types.sort();
        assert_eq!(types, vec![LogType::Tip, LogType::Jira]);
    }

    #[test]
    fn same_timestamp_events_from_different_sources_are_kept() {
        let conn = with_test_db().unwrap();
        status(&conn, "EQP01", "S1", "2024-01-01 00:00:00", None);
        insert(
            &conn,
            "ctttm_log_hist",
            "line_id, sdwt_prod, eqp_cb, ctttm_type, event_time",
            "'L1', 'S1', 'EQP01', 'CHAMBER', '2024-01-01 00:00:00'",
        );

        let events = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["CTTTM-1", "EQP-1"]);
    }

    #[test]
    fn unparseable_timestamp_fails_the_request() {
        let conn = with_test_db().unwrap();
        status(&conn, "EQP01", "S1", "not a time", None);

        let query = validate_timeline_query(Some("L1"), Some("EQP01"), None, None).unwrap();
        let err = TimelineRepo::new(&conn).source_rows(&query).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { .. }));
    }

    #[test]
    fn missing_source_table_fails_the_whole_query() {
        let conn = with_test_db().unwrap();
        status(&conn, "EQP01", "S1", "2024-01-01 00:00:00", None);
        conn.execute_batch("DROP TABLE racb_list").unwrap();

        let query = validate_timeline_query(Some("L1"), Some("EQP01"), None, None).unwrap();
        let err = TimelineRepo::new(&conn).source_rows(&query).unwrap_err();
        assert!(matches!(err, StoreError::Query { .. }));
    }

    #[test]
    fn repeated_fetches_are_identical() {
        let conn = with_test_db().unwrap();
        seed_every_source(&conn);

        let first = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        let second = merge_rows(fetch(&conn, None, None), &LinkTemplates::default());
        assert_eq!(first, second);
    }
}
