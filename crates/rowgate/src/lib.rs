#[macro_use]
mod macros;

mod config;
pub use config::{DefaultSource, TableConfig, TableConfigBuilder};

mod defaults;

mod factory;
pub use factory::{FactoryRegistry, RowFactory, RowInit, RowsetFactory, STANDARD_FACTORY};

mod gateway;
pub use gateway::{Builder, TableGateway};

mod key;
pub use key::{IntoKeys, KeySet, KeyValueSet};

mod keygen;
pub use keygen::KeyGeneration;

mod pk;

mod row;
pub use row::Row;

mod rowset;
pub use rowset::Rowset;

pub use rowgate_core::{async_trait, schema, stmt, Error, Executor, Result};

/// Ordered column name → value payload accepted by insert/update/create_row.
pub type RowData = indexmap::IndexMap<String, stmt::Value>;
