use crate::query::equipment_query;
use crate::util::{optional, query_error, query_strings, required, NamedParams};
use rusqlite::Connection;
use tl_core::error::StoreError;
use tl_core::scopes::ScopeRepository;
use tl_core::types::{EquipmentFilter, EquipmentScope};

pub struct ScopeRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> ScopeRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl ScopeRepository for ScopeRepo<'_> {
    fn lines(&self) -> Result<Vec<String>, StoreError> {
        query_strings(
            self.conn,
            "SELECT DISTINCT line_id FROM sdwt_eqp WHERE line_id IS NOT NULL ORDER BY line_id",
            &NamedParams::default(),
        )
    }

    fn sdwts(&self, line_id: &str) -> Result<Vec<String>, StoreError> {
        let mut params = NamedParams::default();
        params.push(":line", line_id);
        query_strings(
            self.conn,
            "SELECT DISTINCT sdwt_prod FROM sdwt_eqp WHERE line_id = :line AND sdwt_prod IS NOT NULL ORDER BY sdwt_prod",
            &params,
        )
    }

    fn prc_groups(&self, line_id: &str, sdwt_id: &str) -> Result<Vec<String>, StoreError> {
        let mut params = NamedParams::default();
        params.push(":line", line_id);
        params.push(":sdwt", sdwt_id);
        query_strings(
            self.conn,
            "SELECT DISTINCT prc_group FROM sdwt_eqp WHERE line_id = :line AND sdwt_prod = :sdwt AND prc_group IS NOT NULL ORDER BY prc_group",
            &params,
        )
    }

    fn equipments(&self, filter: &EquipmentFilter) -> Result<Vec<EquipmentScope>, StoreError> {
        let bound = equipment_query(filter);
        let mut stmt = self.conn.prepare(&bound.sql).map_err(query_error)?;
        let mut rows = stmt
            .query(bound.params.as_sql().as_slice())
            .map_err(query_error)?;
        let mut scopes = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            scopes.push(map_scope_row(row)?);
        }
        tracing::debug!(
            line_id = %filter.line_id,
            sdwt_id = ?filter.sdwt_id,
            prc_group = ?filter.prc_group,
            rows = scopes.len(),
            "listed equipment"
        );
        Ok(scopes)
    }

    fn equipment(
        &self,
        eqp_id: &str,
        line_id: &str,
    ) -> Result<Option<EquipmentScope>, StoreError> {
        let mut params = NamedParams::default();
        params.push(":eqp", eqp_id);
        params.push(":line", line_id);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT eqp_cb, line_id, sdwt_prod, prc_group FROM sdwt_eqp \
                 WHERE eqp_cb = :eqp AND line_id = :line ORDER BY sdwt_prod, prc_group LIMIT 1",
            )
            .map_err(query_error)?;
        let mut rows = stmt.query(params.as_sql().as_slice()).map_err(query_error)?;
        let Some(row) = rows.next().map_err(query_error)? else {
            return Ok(None);
        };
        map_scope_row(row).map(Some)
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.conn
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|err| StoreError::Connection {
                message: err.to_string(),
            })
    }

    fn equipment_count(&self) -> Result<i64, StoreError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM sdwt_eqp", [], |row| row.get(0))
            .map_err(query_error)
    }
}

fn map_scope_row(row: &rusqlite::Row<'_>) -> Result<EquipmentScope, StoreError> {
    Ok(EquipmentScope {
        id: required(row, "eqp_cb")?,
        line_id: required(row, "line_id")?,
        sdwt_id: optional(row, "sdwt_prod")?,
        prc_group: optional(row, "prc_group")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;

    fn seed(conn: &Connection) {
        conn.execute_batch(
            "INSERT INTO sdwt_eqp (line_id, sdwt_prod, prc_group, eqp_cb) VALUES
                ('L2', 'S9', 'CMP', 'EQP90'),
                ('L1', 'S2', 'ETCH', 'EQP03'),
                ('L1', 'S1', 'PHOTO', 'EQP02'),
                ('L1', 'S1', 'ETCH', 'EQP01'),
                ('L1', 'S1', 'ETCH', 'EQP01'),
                ('L1', NULL, NULL, 'EQP04');",
        )
        .unwrap();
    }

    #[test]
    fn lines_are_distinct_and_sorted() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        assert_eq!(ScopeRepo::new(&conn).lines().unwrap(), vec!["L1", "L2"]);
    }

    #[test]
    fn sdwts_skip_missing_values() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        assert_eq!(ScopeRepo::new(&conn).sdwts("L1").unwrap(), vec!["S1", "S2"]);
        assert!(ScopeRepo::new(&conn).sdwts("L9").unwrap().is_empty());
    }

    #[test]
    fn prc_groups_for_line_and_sdwt() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        assert_eq!(
            ScopeRepo::new(&conn).prc_groups("L1", "S1").unwrap(),
            vec!["ETCH", "PHOTO"]
        );
    }

    #[test]
    fn equipments_with_optional_filters() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        let repo = ScopeRepo::new(&conn);

        let all = repo
            .equipments(&EquipmentFilter {
                line_id: "L1".to_string(),
                ..EquipmentFilter::default()
            })
            .unwrap();
        let ids: Vec<&str> = all.iter().map(|scope| scope.id.as_str()).collect();
        assert_eq!(ids, vec!["EQP01", "EQP02", "EQP03", "EQP04"]);

        let etch = repo
            .equipments(&EquipmentFilter {
                line_id: "L1".to_string(),
                sdwt_id: Some("S1".to_string()),
                prc_group: Some("ETCH".to_string()),
            })
            .unwrap();
        assert_eq!(etch.len(), 1);
        assert_eq!(etch[0].prc_group.as_deref(), Some("ETCH"));
    }

    #[test]
    fn equipment_detail_by_id_and_line() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        let repo = ScopeRepo::new(&conn);

        let scope = repo.equipment("EQP02", "L1").unwrap().unwrap();
        assert_eq!(scope.sdwt_id.as_deref(), Some("S1"));
        assert_eq!(scope.prc_group.as_deref(), Some("PHOTO"));
        assert!(repo.equipment("EQP02", "L2").unwrap().is_none());
    }

    #[test]
    fn health_probe_counts_dimension_rows() {
        let conn = with_test_db().unwrap();
        seed(&conn);
        let repo = ScopeRepo::new(&conn);
        repo.ping().unwrap();
        assert_eq!(repo.equipment_count().unwrap(), 6);
    }

    #[test]
    fn missing_dimension_table_is_a_query_error() {
        let conn = with_test_db().unwrap();
        conn.execute_batch("DROP TABLE sdwt_eqp").unwrap();
        let err = ScopeRepo::new(&conn).lines().unwrap_err();
        assert!(matches!(err, StoreError::Query { .. }));
    }
}
