use crate::{config::DefaultSource, stmt::Value, RowData};

use indexmap::IndexMap;
use rowgate_core::schema::ColumnMetadata;

/// Computes the initial column values for a newly constructed row.
///
/// The result is always total over the metadata's columns, so overlaying the
/// caller's data on top yields a complete row.
pub(crate) fn resolve(
    columns: &IndexMap<String, ColumnMetadata>,
    source: DefaultSource,
    class_defaults: &IndexMap<String, Value>,
    schema_default_overrides: &IndexMap<String, bool>,
) -> RowData {
    let mut defaults: RowData = columns
        .keys()
        .map(|name| (name.clone(), Value::Null))
        .collect();

    match source {
        DefaultSource::None => {}
        DefaultSource::Schema => {
            for (name, column) in columns {
                let Some(default) = &column.default else {
                    continue;
                };
                if default.is_null() {
                    continue;
                }
                match schema_default_overrides.get(name) {
                    // Opted out, even for non-nullable columns
                    Some(false) => continue,
                    // Opted in, even for nullable columns
                    Some(true) => {}
                    None => {
                        if column.nullable {
                            continue;
                        }
                    }
                }
                defaults.insert(name.clone(), default.clone());
            }
        }
        DefaultSource::Class => {
            for (name, value) in class_defaults {
                // Unknown column names in the class defaults are ignored
                if defaults.contains_key(name) {
                    defaults.insert(name.clone(), value.clone());
                }
            }
        }
    }

    defaults
}
