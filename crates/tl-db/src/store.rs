use rusqlite::Connection;
use tl_core::error::StoreError;
use tl_core::store::Store;

use crate::schema;
use crate::scope_repo::ScopeRepo;
use crate::timeline_repo::TimelineRepo;

/// One store session. Dropping it closes the connection.
pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = schema::open(path).map_err(|err| StoreError::Connection {
            message: err.to_string(),
        })?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for DbStore {
    type Timeline<'a>
        = TimelineRepo<'a>
    where
        Self: 'a;
    type Scopes<'a>
        = ScopeRepo<'a>
    where
        Self: 'a;

    fn timeline(&self) -> Self::Timeline<'_> {
        TimelineRepo::new(&self.conn)
    }

    fn scopes(&self) -> Self::Scopes<'_> {
        ScopeRepo::new(&self.conn)
    }
}
