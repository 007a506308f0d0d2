use super::ColumnMetadata;

use std::collections::HashMap;
use std::sync::Mutex;

/// Stores introspected column metadata keyed by qualified table name.
///
/// A hit must return exactly what was stored; the gateway will not re-query
/// the provider for a cached table.
pub trait MetadataCache: std::fmt::Debug + Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<Vec<ColumnMetadata>>;

    fn put(&self, key: &str, columns: &[ColumnMetadata]);
}

/// Process-local metadata cache.
#[derive(Debug, Default)]
pub struct InMemoryMetadataCache {
    entries: Mutex<HashMap<String, Vec<ColumnMetadata>>>,
}

impl InMemoryMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataCache for InMemoryMetadataCache {
    fn get(&self, key: &str) -> Option<Vec<ColumnMetadata>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, columns: &[ColumnMetadata]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), columns.to_vec());
    }
}
