mod flavor;
use flavor::Flavor;

mod value;

use rowgate_core::{
    schema::TableRef,
    stmt::{Predicate, Statement, Value},
};

/// Serialize a statement to a SQL string.
///
/// Data values (INSERT values, UPDATE assignments) become `?` placeholders
/// collected into the params vector. Predicate values are inlined with
/// type-aware quoting, so a captured statement shows the full lookup
/// condition.
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement, params: &mut Vec<Value>) -> String {
        match stmt {
            Statement::Insert {
                table,
                columns,
                values,
            } => {
                let placeholders = vec!["?"; values.len()].join(", ");
                params.extend(values.iter().cloned());
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    self.table(table),
                    self.column_list(columns),
                    placeholders,
                )
            }
            Statement::Update {
                table,
                assignments,
                predicate,
            } => {
                let set = assignments
                    .iter()
                    .map(|assignment| {
                        params.push(assignment.value.clone());
                        format!("{} = ?", self.ident(&assignment.column))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "UPDATE {} SET {} WHERE {}",
                    self.table(table),
                    set,
                    self.predicate(predicate),
                )
            }
            Statement::Delete { table, predicate } => {
                format!(
                    "DELETE FROM {} WHERE {}",
                    self.table(table),
                    self.predicate(predicate),
                )
            }
            Statement::Select {
                table,
                columns,
                predicate,
            } => {
                format!(
                    "SELECT {} FROM {} WHERE {}",
                    self.column_list(columns),
                    self.table(table),
                    self.predicate(predicate),
                )
            }
        }
    }

    /// Render a predicate on its own. Useful for asserting on captured
    /// statements.
    pub fn serialize_predicate(&self, predicate: &Predicate) -> String {
        self.predicate(predicate)
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = self.flavor.identifier_quote();
        // Escape embedded quote characters by doubling them
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    fn predicate(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::Eq { column, value, ty } => {
                format!(
                    "{} = {}",
                    self.ident(column),
                    self.quote_value(value, *ty)
                )
            }
            Predicate::And(conditions) => self.group(conditions, " AND "),
            Predicate::Or(conditions) => self.group(conditions, " OR "),
            Predicate::Raw(fragment) => fragment.clone(),
        }
    }

    fn group(&self, conditions: &[Predicate], sep: &str) -> String {
        let inner = conditions
            .iter()
            .map(|condition| self.predicate(condition))
            .collect::<Vec<_>>()
            .join(sep);
        format!("({inner})")
    }

    fn table(&self, table: &TableRef) -> String {
        match &table.schema {
            Some(schema) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(&table.name)
            ),
            None => self.quote_identifier(&table.name),
        }
    }

    fn column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.ident(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn ident(&self, name: &str) -> String {
        self.quote_identifier(name)
    }
}
