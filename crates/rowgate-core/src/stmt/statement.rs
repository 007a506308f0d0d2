use super::{Predicate, Value};
use crate::schema::TableRef;

/// A structured statement handed to an [`Executor`](crate::Executor).
///
/// Executors render these into the SQL dialect of the backing store (see
/// `rowgate-sql`); rowgate itself never assembles SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert {
        table: TableRef,
        columns: Vec<String>,
        values: Vec<Value>,
    },
    Update {
        table: TableRef,
        assignments: Vec<Assignment>,
        predicate: Predicate,
    },
    Delete {
        table: TableRef,
        predicate: Predicate,
    },
    Select {
        table: TableRef,
        columns: Vec<String>,
        predicate: Predicate,
    },
}

/// A single `column = value` pair in an UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

impl Statement {
    pub fn table(&self) -> &TableRef {
        match self {
            Self::Insert { table, .. }
            | Self::Update { table, .. }
            | Self::Delete { table, .. }
            | Self::Select { table, .. } => table,
        }
    }

    pub const fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    pub const fn is_select(&self) -> bool {
        matches!(self, Self::Select { .. })
    }
}
