pub mod query;
pub mod schema;
pub mod scope_repo;
pub mod store;
pub mod timeline_repo;
pub mod util;

pub use store::DbStore;
