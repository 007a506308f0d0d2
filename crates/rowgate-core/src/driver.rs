use crate::{async_trait, stmt};

use std::fmt::Debug;

/// The SQL execution collaborator.
///
/// Implementations own the connection (or pool) and the dialect; rowgate
/// hands them structured [`stmt::Statement`] values and never assembles SQL
/// text itself. Safety under concurrent use is the implementation's contract;
/// the gateway adds no locking of its own.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Execute a statement that does not produce rows, returning the number
    /// of rows affected.
    async fn execute(&self, stmt: stmt::Statement) -> crate::Result<u64>;

    /// Execute a row-producing statement. Each returned row carries values
    /// positionally aligned to the statement's column list.
    async fn query(&self, stmt: stmt::Statement) -> crate::Result<Vec<Vec<stmt::Value>>>;

    /// The most recent store-generated identity value on this connection.
    async fn last_insert_id(&self) -> crate::Result<stmt::Value>;

    /// The next value of the named database sequence.
    async fn next_sequence_value(&self, sequence: &str) -> crate::Result<stmt::Value>;
}
