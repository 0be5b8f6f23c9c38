use crate::{app, AppState};
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use rusqlite::Connection;
use std::time::Duration;
use tempfile::TempDir;
use tl_core::sources::LinkTemplates;
use tower::ServiceExt;

pub struct TestApp {
    _dir: TempDir,
    conn: Option<Connection>,
    pub state: AppState,
}

impl TestApp {
    /// Fresh database file with the source tables installed.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.db");
        let path = path.to_str().unwrap().to_string();
        let conn = tl_db::schema::create(&path).unwrap();
        Self {
            state: Self::state(path),
            conn: Some(conn),
            _dir: dir,
        }
    }

    /// Points at a path that was never created.
    pub fn without_database() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let path = path.to_str().unwrap().to_string();
        Self {
            state: Self::state(path),
            conn: None,
            _dir: dir,
        }
    }

    fn state(path: String) -> AppState {
        AppState::new(path, LinkTemplates::default(), Duration::from_secs(5))
    }

    pub fn exec(&self, sql: &str) {
        self.conn
            .as_ref()
            .expect("test app has no database")
            .execute_batch(sql)
            .unwrap();
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = app(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, _, body) = self.get(uri).await;
        let value = serde_json::from_slice(&body).unwrap();
        (status, value)
    }
}
