use crate::{gateway::TableGateway, row::Row, rowset::Rowset, Error, RowData};

use std::collections::HashMap;

/// Tag of the built-in row/rowset constructors.
pub const STANDARD_FACTORY: &str = "standard";

/// Everything a row constructor receives.
#[derive(Debug)]
pub struct RowInit {
    /// Gateway the row delegates save/delete back to
    pub gateway: TableGateway,

    /// Complete ordered column → value mapping
    pub data: RowData,

    /// True when the row reflects a persisted tuple
    pub stored: bool,

    pub read_only: bool,
}

pub type RowFactory = fn(RowInit) -> Row;

pub type RowsetFactory = fn(Vec<Row>) -> Rowset;

/// Maps factory tags to constructor functions.
///
/// Gateways resolve their configured tags against this at connect time;
/// constructors are plain function pointers, never names resolved at runtime.
#[derive(Debug)]
pub struct FactoryRegistry {
    rows: HashMap<&'static str, RowFactory>,
    rowsets: HashMap<&'static str, RowsetFactory>,
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        let mut registry = FactoryRegistry {
            rows: HashMap::new(),
            rowsets: HashMap::new(),
        };
        registry.register_row(STANDARD_FACTORY, Row::new);
        registry.register_rowset(STANDARD_FACTORY, Rowset::new);
        registry
    }
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_row(&mut self, tag: &'static str, factory: RowFactory) -> &mut Self {
        self.rows.insert(tag, factory);
        self
    }

    pub fn register_rowset(&mut self, tag: &'static str, factory: RowsetFactory) -> &mut Self {
        self.rowsets.insert(tag, factory);
        self
    }

    pub(crate) fn row(&self, tag: &str) -> crate::Result<RowFactory> {
        self.rows
            .get(tag)
            .copied()
            .ok_or_else(|| Error::configuration(format!("unknown row factory `{tag}`")))
    }

    pub(crate) fn rowset(&self, tag: &str) -> crate::Result<RowsetFactory> {
        self.rowsets
            .get(tag)
            .copied()
            .ok_or_else(|| Error::configuration(format!("unknown rowset factory `{tag}`")))
    }
}
