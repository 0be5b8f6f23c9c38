use crate::error::StoreError;
use crate::types::{SourceRow, TimelineQuery};

pub trait TimelineRepository {
    /// Fetches the rows of every source selected by `query` in one all-or-nothing
    /// call. Row order is unspecified.
    fn source_rows(&self, query: &TimelineQuery) -> Result<Vec<SourceRow>, StoreError>;
}
