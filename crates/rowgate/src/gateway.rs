mod builder;
pub use builder::Builder;

use crate::{
    config::{DefaultSource, TableConfig},
    defaults,
    factory::{RowFactory, RowInit, RowsetFactory},
    key::{self, IntoKeys, KeyValueSet},
    keygen::KeyGeneration,
    pk::ResolvedKey,
    row::Row,
    rowset::Rowset,
    stmt::{Assignment, Predicate, Statement, Value},
    Error, Executor, RowData,
};

use indexmap::IndexMap;
use rowgate_core::schema::{ColumnMetadata, TableRef};

use std::fmt;
use std::sync::Arc;

/// Shared state between all `TableGateway` clones.
struct Shared {
    config: TableConfig,
    executor: Arc<dyn Executor>,
    columns: IndexMap<String, ColumnMetadata>,
    key: ResolvedKey,
    row_factory: RowFactory,
    rowset_factory: RowsetFactory,
}

/// A gateway to one relational table.
///
/// Holds no mutable state beyond its immutable configuration and resolved
/// metadata; cloning is cheap and clones are safe to use concurrently as long
/// as the executor is. Each CRUD call is a single round trip to the executor,
/// except insert under the Sequence/Identity strategies which performs two;
/// those sub-steps are not transactional at this layer.
#[derive(Clone)]
pub struct TableGateway {
    shared: Arc<Shared>,
}

impl TableGateway {
    pub fn builder(config: TableConfig) -> Builder {
        Builder::new(config)
    }

    pub fn config(&self) -> &TableConfig {
        &self.shared.config
    }

    pub fn table(&self) -> TableRef {
        self.shared.config.table_ref()
    }

    /// Introspected column metadata, in store order.
    pub fn columns(&self) -> &IndexMap<String, ColumnMetadata> {
        &self.shared.columns
    }

    /// Resolved primary-key column names, in key order.
    pub fn primary_key_columns(&self) -> &[String] {
        &self.shared.key.columns
    }

    /// Inserts a new row and returns its primary-key values: a scalar for a
    /// single-column key, an ordered column → value mapping otherwise.
    pub async fn insert(&self, mut data: RowData) -> crate::Result<KeyValueSet> {
        self.check_columns(&data, "insert")?;

        let identity_column = self.shared.key.identity_column().to_string();

        // Sequence strategy: inject the next sequence value when the caller
        // did not supply one. An explicit value always wins.
        if let KeyGeneration::Sequence(sequence) = &self.shared.config.key_generation {
            let absent = data.get(&identity_column).map_or(true, Value::is_null);
            if absent {
                let value = self
                    .shared
                    .executor
                    .next_sequence_value(sequence)
                    .await
                    .map_err(|err| err.context(self.op_err("insert")))?;
                data.insert(identity_column.clone(), value);
            }
        }

        // A null identity value is stripped so the store applies its own
        // generation or default.
        if data
            .get(&identity_column)
            .is_some_and(|value| value.is_null())
        {
            data.shift_remove(&identity_column);
        }

        let stmt = Statement::Insert {
            table: self.table(),
            columns: data.keys().cloned().collect(),
            values: data.values().cloned().collect(),
        };
        self.shared
            .executor
            .execute(stmt)
            .await
            .map_err(|err| err.context(self.op_err("insert")))?;

        // Identity strategy: the store generated the value, read it back.
        if self.shared.config.key_generation == KeyGeneration::Identity
            && !data.contains_key(&identity_column)
        {
            let value = self
                .shared
                .executor
                .last_insert_id()
                .await
                .map_err(|err| err.context(self.op_err("insert")))?;
            data.insert(identity_column, value);
        }

        let key_columns = &self.shared.key.columns;
        if let [column] = key_columns.as_slice() {
            return Ok(KeyValueSet::Single(
                data.get(column).cloned().unwrap_or(Value::Null),
            ));
        }
        Ok(KeyValueSet::Composite(
            key_columns
                .iter()
                .filter_map(|column| data.get(column).map(|value| (column.clone(), value.clone())))
                .collect(),
        ))
    }

    /// Updates rows matched by `predicate`, returning the affected count.
    ///
    /// The predicate is the caller's responsibility; a malformed raw fragment
    /// surfaces as an execution error from the executor.
    pub async fn update(&self, data: RowData, predicate: Predicate) -> crate::Result<u64> {
        self.check_columns(&data, "update")?;

        let stmt = Statement::Update {
            table: self.table(),
            assignments: data
                .into_iter()
                .map(|(column, value)| Assignment { column, value })
                .collect(),
            predicate,
        };
        self.shared
            .executor
            .execute(stmt)
            .await
            .map_err(|err| err.context(self.op_err("update")))
    }

    /// Deletes rows matched by `predicate`, returning the affected count.
    pub async fn delete(&self, predicate: Predicate) -> crate::Result<u64> {
        let stmt = Statement::Delete {
            table: self.table(),
            predicate,
        };
        self.shared
            .executor
            .execute(stmt)
            .await
            .map_err(|err| err.context(self.op_err("delete")))
    }

    /// Fetches rows by primary key.
    ///
    /// Accepts anything convertible to a [`KeySet`](crate::KeySet): a scalar
    /// for single-column keys, tuples for composite keys, `Vec`s of either
    /// for multi-row lookup, or the `KeyValueSet` returned by [`insert`].
    /// All supplied tuples must match the primary key's arity. An empty key
    /// set yields an empty rowset without querying the store.
    ///
    /// [`insert`]: Self::insert
    pub async fn find(&self, keys: impl IntoKeys) -> crate::Result<Rowset> {
        let keys = keys.into_keys();
        keys.check_arity(self.shared.key.columns.len(), &self.shared.config.name)?;

        let Some(predicate) = key::key_predicate(&self.shared.key, &self.shared.columns, &keys)
        else {
            return Ok((self.shared.rowset_factory)(Vec::new()));
        };

        let columns: Vec<String> = self.shared.columns.keys().cloned().collect();
        let stmt = Statement::Select {
            table: self.table(),
            columns: columns.clone(),
            predicate,
        };
        let tuples = self
            .shared
            .executor
            .query(stmt)
            .await
            .map_err(|err| err.context(self.op_err("find")))?;

        let rows = tuples
            .into_iter()
            .map(|values| {
                (self.shared.row_factory)(RowInit {
                    gateway: self.clone(),
                    data: columns.iter().cloned().zip(values).collect(),
                    stored: true,
                    read_only: false,
                })
            })
            .collect();
        Ok((self.shared.rowset_factory)(rows))
    }

    /// Creates a new unstored row: defaults per the table's (or the per-call)
    /// default source, overlaid with `data`. Caller values always win.
    pub fn create_row(
        &self,
        data: RowData,
        default_source: Option<DefaultSource>,
    ) -> crate::Result<Row> {
        self.check_columns(&data, "create_row")?;

        let source = default_source.unwrap_or(self.shared.config.default_source);
        let mut values = defaults::resolve(
            &self.shared.columns,
            source,
            &self.shared.config.class_defaults,
            &self.shared.config.schema_default_overrides,
        );
        for (column, value) in data {
            values.insert(column, value);
        }

        Ok((self.shared.row_factory)(RowInit {
            gateway: self.clone(),
            data: values,
            stored: false,
            read_only: false,
        }))
    }

    fn check_columns(&self, data: &RowData, operation: &str) -> crate::Result<()> {
        for column in data.keys() {
            if !self.shared.columns.contains_key(column) {
                return Err(Error::argument(format!(
                    "unknown column `{}` in {} data for table {}",
                    column,
                    operation,
                    self.table()
                )));
            }
        }
        Ok(())
    }

    fn op_err(&self, operation: &str) -> Error {
        Error::execution(format!("{} on table {}", operation, self.table()))
    }
}

impl fmt::Debug for TableGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableGateway")
            .field("table", &self.shared.config.table_ref())
            .field("primary_key", &self.shared.key.columns)
            .finish()
    }
}
