use crate::{config::TableConfig, Error};

use indexmap::IndexMap;
use rowgate_core::schema::ColumnMetadata;

/// The table's primary key, resolved against introspected metadata.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedKey {
    /// Ordered primary-key column names
    pub(crate) columns: Vec<String>,

    /// Index of the identity column within `columns`
    pub(crate) identity: usize,
}

impl ResolvedKey {
    pub(crate) fn identity_column(&self) -> &str {
        &self.columns[self.identity]
    }
}

/// Derives the primary-key columns and identity index from configuration and
/// metadata. An empty configured key is inferred from the metadata's
/// identity-flagged columns.
pub(crate) fn resolve(
    config: &TableConfig,
    columns: &IndexMap<String, ColumnMetadata>,
) -> crate::Result<ResolvedKey> {
    if config.primary_key.is_empty() {
        let inferred: Vec<String> = columns
            .values()
            .filter(|column| column.identity)
            .map(|column| column.name.clone())
            .collect();

        if inferred.is_empty() {
            return Err(Error::configuration(format!(
                "table {} has no configured primary key and no identity column to infer one from",
                config.table_ref()
            )));
        }

        return Ok(ResolvedKey {
            columns: inferred,
            identity: 0,
        });
    }

    for column in &config.primary_key {
        if !columns.contains_key(column) {
            return Err(Error::configuration(format!(
                "primary key references unknown column `{}` on table {}",
                column,
                config.table_ref()
            )));
        }
    }

    if config.identity_index >= config.primary_key.len() {
        return Err(Error::configuration(format!(
            "identity index {} is out of range for the {}-column primary key of table {}",
            config.identity_index,
            config.primary_key.len(),
            config.table_ref()
        )));
    }

    Ok(ResolvedKey {
        columns: config.primary_key.clone(),
        identity: config.identity_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::Type;

    fn metadata(columns: Vec<ColumnMetadata>) -> IndexMap<String, ColumnMetadata> {
        columns
            .into_iter()
            .map(|column| (column.name.clone(), column))
            .collect()
    }

    #[test]
    fn explicit_key_resolves() {
        let config = TableConfig::builder("space")
            .primary_key(["venue_id", "space_id"])
            .identity_index(1)
            .build();
        let columns = metadata(vec![
            ColumnMetadata::new("venue_id", Type::Integer),
            ColumnMetadata::new("space_id", Type::Integer),
            ColumnMetadata::new("label", Type::Text),
        ]);

        let key = resolve(&config, &columns).unwrap();
        assert_eq!(key.columns, ["venue_id", "space_id"]);
        assert_eq!(key.identity_column(), "space_id");
    }

    #[test]
    fn infers_key_from_identity_column() {
        let config = TableConfig::builder("users").build();
        let columns = metadata(vec![
            ColumnMetadata::new("id", Type::Integer).identity(),
            ColumnMetadata::new("name", Type::Text),
        ]);

        let key = resolve(&config, &columns).unwrap();
        assert_eq!(key.columns, ["id"]);
        assert_eq!(key.identity, 0);
    }

    #[test]
    fn unknown_key_column_is_a_configuration_error() {
        let config = TableConfig::builder("users").primary_key(["nope"]).build();
        let columns = metadata(vec![ColumnMetadata::new("id", Type::Integer)]);

        let err = resolve(&config, &columns).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn identity_index_out_of_range() {
        let config = TableConfig::builder("users")
            .primary_key(["id"])
            .identity_index(3)
            .build();
        let columns = metadata(vec![ColumnMetadata::new("id", Type::Integer)]);

        let err = resolve(&config, &columns).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn no_key_and_no_identity_fails() {
        let config = TableConfig::builder("logs").build();
        let columns = metadata(vec![ColumnMetadata::new("message", Type::Text)]);

        assert!(resolve(&config, &columns).unwrap_err().is_configuration());
    }
}
