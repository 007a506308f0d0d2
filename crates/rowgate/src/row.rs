use crate::{
    factory::RowInit,
    gateway::TableGateway,
    stmt::{Predicate, Value},
    Error, KeyValueSet, RowData,
};

/// One tuple of a table, with a back-reference to the owning gateway for
/// save/delete.
///
/// Created either by `find` (stored, populated from a fetched tuple) or by
/// `create_row` (unstored, populated from defaults overlaid with caller
/// data). Plain in-memory value holder; concurrent mutation is the caller's
/// problem to serialize.
#[derive(Debug)]
pub struct Row {
    gateway: TableGateway,
    data: RowData,
    stored: bool,
    read_only: bool,
}

impl Row {
    /// The standard row constructor. Custom factories may adjust the init
    /// before delegating here.
    pub fn new(init: RowInit) -> Self {
        Self {
            gateway: init.gateway,
            data: init.data,
            stored: init.stored,
            read_only: init.read_only,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> crate::Result<()> {
        if self.read_only {
            return Err(Error::argument(format!(
                "cannot modify read-only row of table {}",
                self.gateway.table()
            )));
        }
        if !self.gateway.columns().contains_key(column) {
            return Err(Error::argument(format!(
                "unknown column `{}` on table {}",
                column,
                self.gateway.table()
            )));
        }
        self.data.insert(column.to_string(), value.into());
        Ok(())
    }

    pub fn data(&self) -> &RowData {
        &self.data
    }

    pub fn into_data(self) -> RowData {
        self.data
    }

    pub fn is_stored(&self) -> bool {
        self.stored
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The row's current primary-key values, in primary-key column order.
    pub fn primary_key(&self) -> crate::Result<KeyValueSet> {
        let columns = self.gateway.primary_key_columns();
        if let [column] = columns {
            return Ok(KeyValueSet::Single(self.key_value(column)?));
        }
        let mut map = indexmap::IndexMap::new();
        for column in columns {
            map.insert(column.clone(), self.key_value(column)?);
        }
        Ok(KeyValueSet::Composite(map))
    }

    /// Persists the row: insert when unstored (absorbing any store-generated
    /// key), update keyed by the current primary-key values when stored.
    pub async fn save(&mut self) -> crate::Result<()> {
        if self.read_only {
            return Err(Error::argument(format!(
                "cannot save read-only row of table {}",
                self.gateway.table()
            )));
        }

        if self.stored {
            let predicate = self.key_predicate()?;
            let key_columns = self.gateway.primary_key_columns();
            let assignments: RowData = self
                .data
                .iter()
                .filter(|(column, _)| !key_columns.contains(*column))
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect();
            self.gateway.update(assignments, predicate).await?;
        } else {
            // Null columns are omitted so the store can apply its own defaults
            let data: RowData = self
                .data
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect();

            match self.gateway.insert(data).await? {
                KeyValueSet::Single(value) => {
                    let column = self.gateway.primary_key_columns()[0].clone();
                    self.data.insert(column, value);
                }
                KeyValueSet::Composite(map) => {
                    for (column, value) in map {
                        self.data.insert(column, value);
                    }
                }
            }
            self.stored = true;
        }

        Ok(())
    }

    /// Deletes the persisted tuple this row represents, keyed by the current
    /// primary-key values.
    pub async fn delete(self) -> crate::Result<u64> {
        if !self.stored {
            return Err(Error::argument(format!(
                "cannot delete unstored row of table {}",
                self.gateway.table()
            )));
        }
        let predicate = self.key_predicate()?;
        self.gateway.delete(predicate).await
    }

    fn key_value(&self, column: &str) -> crate::Result<Value> {
        match self.data.get(column) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(Error::argument(format!(
                "row of table {} has no value for primary key column `{}`",
                self.gateway.table(),
                column
            ))),
        }
    }

    fn key_predicate(&self) -> crate::Result<Predicate> {
        let columns = self.gateway.columns();
        let conditions = self
            .gateway
            .primary_key_columns()
            .iter()
            .map(|column| {
                Ok(Predicate::eq(
                    column.clone(),
                    self.key_value(column)?,
                    columns[column].ty,
                ))
            })
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Predicate::and(conditions))
    }
}
