use rusqlite::{Connection, OpenFlags, Result};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Opens a read-only session on the event database.
pub fn open(path: &str) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

/// Creates the dimension and source tables. Used to stand up local and test
/// databases; production databases are owned by the source systems.
pub fn install_source_tables(conn: &Connection) -> Result<()> {
    let sql = include_str!("../sql/source_tables.sql");
    conn.execute_batch(sql)?;
    Ok(())
}

/// Creates (or reuses) a writable database file with the source tables installed.
pub fn create(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    install_source_tables(&conn)?;
    Ok(conn)
}

pub fn with_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    install_source_tables(&conn)?;
    Ok(conn)
}
