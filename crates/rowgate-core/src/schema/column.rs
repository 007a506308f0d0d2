use crate::stmt::{Type, Value};

/// Introspected metadata for a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// The name of the column in the database.
    pub name: String,

    /// The driver-reported type tag, used only for value quoting/coercion.
    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// The schema-level default value, if the column declares one.
    pub default: Option<Value>,

    /// True if the column is eligible for store-generated values
    /// (auto-increment or sequence).
    pub identity: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
            default: None,
            identity: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}
