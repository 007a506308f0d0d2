use crate::{factory::STANDARD_FACTORY, keygen::KeyGeneration, stmt::Value};

use indexmap::IndexMap;
use rowgate_core::schema::TableRef;

/// How a newly created row's unset columns are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultSource {
    /// All columns start as null.
    #[default]
    None,

    /// Columns take their schema-declared defaults (see
    /// [`TableConfigBuilder::schema_default`] for the nullable opt-in rule).
    Schema,

    /// Columns take the class-level defaults declared on the config.
    Class,
}

/// Configuration for a [`TableGateway`](crate::TableGateway).
///
/// Immutable once built; construct via [`TableConfig::builder`].
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Optional namespace the table lives in
    pub schema: Option<String>,

    /// Name of the table
    pub name: String,

    /// Ordered primary-key column names. Empty means "infer from the
    /// metadata's identity-flagged columns".
    pub primary_key: Vec<String>,

    /// Index into `primary_key` of the column eligible for store-generated
    /// values.
    pub identity_index: usize,

    /// How a missing identity value is produced at insert time.
    pub key_generation: KeyGeneration,

    /// Default-source policy applied by `create_row`.
    pub default_source: DefaultSource,

    /// Factory tags resolved against the registry at connect time.
    pub row_factory: String,
    pub rowset_factory: String,

    /// Consult the metadata cache collaborator before introspecting.
    pub metadata_cache: bool,

    /// Class-level column defaults, applied under `DefaultSource::Class`.
    pub class_defaults: IndexMap<String, Value>,

    /// Per-column opt-in/out for schema defaults on nullable columns, applied
    /// under `DefaultSource::Schema`.
    pub schema_default_overrides: IndexMap<String, bool>,
}

impl TableConfig {
    pub fn builder(name: impl Into<String>) -> TableConfigBuilder {
        TableConfigBuilder {
            config: TableConfig {
                schema: None,
                name: name.into(),
                primary_key: vec![],
                identity_index: 0,
                key_generation: KeyGeneration::None,
                default_source: DefaultSource::None,
                row_factory: STANDARD_FACTORY.to_string(),
                rowset_factory: STANDARD_FACTORY.to_string(),
                metadata_cache: false,
                class_defaults: IndexMap::new(),
                schema_default_overrides: IndexMap::new(),
            },
        }
    }

    pub fn table_ref(&self) -> TableRef {
        match &self.schema {
            Some(schema) => TableRef::with_schema(schema.clone(), self.name.clone()),
            None => TableRef::new(self.name.clone()),
        }
    }
}

pub struct TableConfigBuilder {
    config: TableConfig,
}

impl TableConfigBuilder {
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = Some(schema.into());
        self
    }

    /// Explicit ordered primary key. When never called, the key is inferred
    /// from the metadata's identity-flagged columns at connect time.
    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn identity_index(mut self, index: usize) -> Self {
        self.config.identity_index = index;
        self
    }

    pub fn key_generation(mut self, strategy: KeyGeneration) -> Self {
        self.config.key_generation = strategy;
        self
    }

    pub fn default_source(mut self, source: DefaultSource) -> Self {
        self.config.default_source = source;
        self
    }

    pub fn row_factory(mut self, tag: impl Into<String>) -> Self {
        self.config.row_factory = tag.into();
        self
    }

    pub fn rowset_factory(mut self, tag: impl Into<String>) -> Self {
        self.config.rowset_factory = tag.into();
        self
    }

    pub fn metadata_cache(mut self, enabled: bool) -> Self {
        self.config.metadata_cache = enabled;
        self
    }

    /// Declare a class-level default for a column. Names that do not exist in
    /// the table's metadata are ignored at resolution time.
    pub fn class_default(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.class_defaults.insert(column.into(), value.into());
        self
    }

    /// Under `DefaultSource::Schema`, a nullable column only receives its
    /// schema default when flagged `true` here; `false` suppresses the
    /// default even for non-nullable columns.
    pub fn schema_default(mut self, column: impl Into<String>, apply: bool) -> Self {
        self.config
            .schema_default_overrides
            .insert(column.into(), apply);
        self
    }

    pub fn build(self) -> TableConfig {
        self.config
    }
}
