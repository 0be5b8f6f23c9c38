pub mod error;
pub mod events;
pub mod scopes;
pub mod sources;
pub mod store;
pub mod timeline;
pub mod validation;

pub mod types;

pub use crate::error::TimelineError;
pub use crate::store::Store;
pub use crate::timeline::Timeline;
