mod cache;
pub use cache::{InMemoryMetadataCache, MetadataCache};

mod column;
pub use column::ColumnMetadata;

mod provider;
pub use provider::SchemaProvider;

mod table;
pub use table::TableRef;
