use super::{Shared, TableGateway};
use crate::{config::TableConfig, factory::FactoryRegistry, pk, Error, Executor};

use indexmap::IndexMap;
use rowgate_core::schema::{ColumnMetadata, MetadataCache, SchemaProvider};

use std::sync::Arc;

/// Assembles a [`TableGateway`] from its configuration and collaborators.
///
/// All collaborators are injected here; nothing is resolved from globals.
pub struct Builder {
    config: TableConfig,
    executor: Option<Arc<dyn Executor>>,
    schema_provider: Option<Arc<dyn SchemaProvider>>,
    metadata_cache: Option<Arc<dyn MetadataCache>>,
    factories: FactoryRegistry,
}

impl Builder {
    pub(super) fn new(config: TableConfig) -> Self {
        Self {
            config,
            executor: None,
            schema_provider: None,
            metadata_cache: None,
            factories: FactoryRegistry::default(),
        }
    }

    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn schema_provider(mut self, provider: Arc<dyn SchemaProvider>) -> Self {
        self.schema_provider = Some(provider);
        self
    }

    /// Optional; only consulted when the config enables metadata caching.
    pub fn metadata_cache(mut self, cache: Arc<dyn MetadataCache>) -> Self {
        self.metadata_cache = Some(cache);
        self
    }

    pub fn factories(mut self, registry: FactoryRegistry) -> Self {
        self.factories = registry;
        self
    }

    /// Introspects the table, resolves the primary key and the configured
    /// factories, and returns the ready gateway.
    pub async fn connect(self) -> crate::Result<TableGateway> {
        let executor = self
            .executor
            .ok_or_else(|| Error::configuration("no executor supplied"))?;
        let provider = self
            .schema_provider
            .ok_or_else(|| Error::configuration("no schema provider supplied"))?;

        let table = self.config.table_ref();

        let described = match (&self.metadata_cache, self.config.metadata_cache) {
            (Some(cache), true) => {
                let cache_key = table.qualified();
                match cache.get(&cache_key) {
                    Some(columns) => columns,
                    None => {
                        let columns = provider
                            .describe(&table)
                            .await
                            .map_err(|err| err.context(describe_err(&table)))?;
                        cache.put(&cache_key, &columns);
                        columns
                    }
                }
            }
            _ => provider
                .describe(&table)
                .await
                .map_err(|err| err.context(describe_err(&table)))?,
        };

        let columns: IndexMap<String, ColumnMetadata> = described
            .into_iter()
            .map(|column| (column.name.clone(), column))
            .collect();

        let key = pk::resolve(&self.config, &columns)?;
        let row_factory = self.factories.row(&self.config.row_factory)?;
        let rowset_factory = self.factories.rowset(&self.config.rowset_factory)?;

        Ok(TableGateway {
            shared: Arc::new(Shared {
                config: self.config,
                executor,
                columns,
                key,
                row_factory,
                rowset_factory,
            }),
        })
    }
}

fn describe_err(table: &rowgate_core::schema::TableRef) -> Error {
    Error::schema(format!("describe table {table}"))
}
