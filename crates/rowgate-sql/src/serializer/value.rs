use super::Serializer;

use rowgate_core::stmt::{Type, Value};

impl Serializer {
    /// Render a value as a SQL literal, using the column's reported type to
    /// decide between bare and quoted forms.
    pub fn quote_value(&self, value: &Value, ty: Type) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
            Value::I64(v) => {
                if ty.is_numeric() {
                    v.to_string()
                } else {
                    quote_text(&v.to_string())
                }
            }
            Value::F64(v) => {
                if ty.is_numeric() {
                    v.to_string()
                } else {
                    quote_text(&v.to_string())
                }
            }
            // String payloads are always quoted, even for numeric columns.
            Value::String(v) => quote_text(v),
        }
    }
}

fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
