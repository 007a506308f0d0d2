#![allow(dead_code)]

use rowgate::{
    async_trait,
    schema::{ColumnMetadata, SchemaProvider, TableRef},
    stmt::{Statement, Type, Value},
    Error, Executor, RowData, TableConfig, TableGateway,
};

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// In-memory store that doubles as executor and schema provider.
///
/// Every statement is captured in a log so tests can assert on exactly what
/// the gateway sent, and structured statements are interpreted against plain
/// vectors of rows so round trips behave like a real store.
#[derive(Debug, Default)]
pub struct MockDb {
    tables: Mutex<HashMap<String, MemTable>>,
    log: Mutex<Vec<Statement>>,
    last_insert_id: Mutex<Value>,
    sequences: Mutex<HashMap<String, i64>>,
    describe_calls: AtomicUsize,
    sequence_fetches: AtomicUsize,
}

#[derive(Debug, Default)]
struct MemTable {
    columns: Vec<ColumnMetadata>,
    rows: Vec<RowData>,
    next_identity: i64,
}

impl MockDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table shape under its qualified name.
    pub fn register_table(&self, name: &str, columns: Vec<ColumnMetadata>) {
        self.tables.lock().unwrap().insert(
            name.to_string(),
            MemTable {
                columns,
                rows: vec![],
                next_identity: 0,
            },
        );
    }

    /// Seed a row directly, bypassing the executor path.
    pub fn seed_row(&self, name: &str, row: RowData) {
        self.tables
            .lock()
            .unwrap()
            .get_mut(name)
            .expect("table not registered")
            .rows
            .push(row);
    }

    pub fn rows(&self, name: &str) -> Vec<RowData> {
        self.tables.lock().unwrap()[name].rows.clone()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.log.lock().unwrap().clone()
    }

    pub fn select_count(&self) -> usize {
        self.statements()
            .iter()
            .filter(|stmt| stmt.is_select())
            .count()
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn sequence_fetches(&self) -> usize {
        self.sequence_fetches.load(Ordering::SeqCst)
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    fn log(&self, stmt: &Statement) {
        self.log.lock().unwrap().push(stmt.clone());
    }
}

#[async_trait]
impl Executor for MockDb {
    async fn execute(&self, stmt: Statement) -> rowgate::Result<u64> {
        self.log(&stmt);

        let mut tables = self.tables.lock().unwrap();
        match stmt {
            Statement::Insert {
                table,
                columns,
                values,
            } => {
                let table = tables
                    .get_mut(&table.qualified())
                    .ok_or_else(|| Error::execution(format!("no such table {table}")))?;

                let mut supplied: RowData = columns.into_iter().zip(values).collect();
                let mut row = RowData::new();
                for column in &table.columns {
                    let value = match supplied.shift_remove(&column.name) {
                        Some(value) => value,
                        None if column.identity => {
                            table.next_identity += 1;
                            let generated = Value::I64(table.next_identity);
                            *self.last_insert_id.lock().unwrap() = generated.clone();
                            generated
                        }
                        None => column.default.clone().unwrap_or(Value::Null),
                    };
                    row.insert(column.name.clone(), value);
                }
                table.rows.push(row);
                Ok(1)
            }
            Statement::Update {
                table,
                assignments,
                predicate,
            } => {
                let table = tables
                    .get_mut(&table.qualified())
                    .ok_or_else(|| Error::execution(format!("no such table {table}")))?;

                let mut affected = 0;
                for row in &mut table.rows {
                    if predicate.matches(row)? {
                        for assignment in &assignments {
                            row.insert(assignment.column.clone(), assignment.value.clone());
                        }
                        affected += 1;
                    }
                }
                Ok(affected)
            }
            Statement::Delete { table, predicate } => {
                let table = tables
                    .get_mut(&table.qualified())
                    .ok_or_else(|| Error::execution(format!("no such table {table}")))?;

                // A real store parses the predicate before touching any rows,
                // so malformed (raw) fragments fail even on an empty table.
                predicate.matches(&RowData::new())?;

                let before = table.rows.len();
                let mut kept = Vec::with_capacity(before);
                for row in table.rows.drain(..) {
                    if predicate.matches(&row)? {
                        continue;
                    }
                    kept.push(row);
                }
                table.rows = kept;
                Ok((before - table.rows.len()) as u64)
            }
            Statement::Select { .. } => Err(Error::execution("SELECT passed to execute")),
        }
    }

    async fn query(&self, stmt: Statement) -> rowgate::Result<Vec<Vec<Value>>> {
        self.log(&stmt);

        let tables = self.tables.lock().unwrap();
        match stmt {
            Statement::Select {
                table,
                columns,
                predicate,
            } => {
                let table = tables
                    .get(&table.qualified())
                    .ok_or_else(|| Error::execution(format!("no such table {table}")))?;

                let mut tuples = vec![];
                for row in &table.rows {
                    if predicate.matches(row)? {
                        tuples.push(
                            columns
                                .iter()
                                .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                                .collect(),
                        );
                    }
                }
                Ok(tuples)
            }
            other => Err(Error::execution(format!(
                "row-less statement passed to query: {other:?}"
            ))),
        }
    }

    async fn last_insert_id(&self) -> rowgate::Result<Value> {
        Ok(self.last_insert_id.lock().unwrap().clone())
    }

    async fn next_sequence_value(&self, sequence: &str) -> rowgate::Result<Value> {
        self.sequence_fetches.fetch_add(1, Ordering::SeqCst);
        let mut sequences = self.sequences.lock().unwrap();
        let value = sequences.entry(sequence.to_string()).or_insert(0);
        *value += 1;
        Ok(Value::I64(*value))
    }
}

#[async_trait]
impl SchemaProvider for MockDb {
    async fn describe(&self, table: &TableRef) -> rowgate::Result<Vec<ColumnMetadata>> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.tables
            .lock()
            .unwrap()
            .get(&table.qualified())
            .map(|table| table.columns.clone())
            .ok_or_else(|| Error::schema(format!("unknown table {table}")))
    }
}

/// `users`: single-column identity key `id`, plus `name` and `email`.
pub fn users_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("id", Type::Integer).not_null().identity(),
        ColumnMetadata::new("name", Type::Text).not_null(),
        ColumnMetadata::new("email", Type::Text),
    ]
}

/// `space`: composite key `(venue_id, space_id)`.
pub fn space_columns() -> Vec<ColumnMetadata> {
    vec![
        ColumnMetadata::new("venue_id", Type::Integer).not_null(),
        ColumnMetadata::new("space_id", Type::Integer).not_null(),
        ColumnMetadata::new("label", Type::Text),
    ]
}

pub async fn connect(db: &std::sync::Arc<MockDb>, config: TableConfig) -> TableGateway {
    TableGateway::builder(config)
        .executor(db.clone())
        .schema_provider(db.clone())
        .connect()
        .await
        .unwrap()
}
