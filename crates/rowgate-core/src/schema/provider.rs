use super::{ColumnMetadata, TableRef};
use crate::async_trait;

/// Introspects table shapes from the backing store.
#[async_trait]
pub trait SchemaProvider: std::fmt::Debug + Send + Sync + 'static {
    /// Describe the columns of `table`, in the order the store reports them.
    ///
    /// The result must be deterministic for a given table. Fails with a
    /// schema error when the table does not exist or the store cannot be
    /// introspected.
    async fn describe(&self, table: &TableRef) -> crate::Result<Vec<ColumnMetadata>>;
}
