use super::{Type, Value};

/// A row-restriction condition for update/delete/select statements.
///
/// The structured variants are what rowgate builds itself (primary-key
/// lookups, row save/delete). `Raw` is the escape hatch for callers that need
/// a fragment the structured forms cannot express; drivers splice it into the
/// statement verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`, quoted according to `ty`
    Eq {
        column: String,
        value: Value,
        ty: Type,
    },

    /// Conjunction of conditions
    And(Vec<Predicate>),

    /// Disjunction of conditions
    Or(Vec<Predicate>),

    /// Verbatim SQL fragment
    Raw(String),
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>, ty: Type) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.into(),
            ty,
        }
    }

    pub fn and(conditions: Vec<Predicate>) -> Self {
        Self::And(conditions)
    }

    pub fn or(conditions: Vec<Predicate>) -> Self {
        Self::Or(conditions)
    }

    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into())
    }

    /// Evaluates the predicate against an in-memory row.
    ///
    /// `Raw` fragments cannot be evaluated without a SQL engine and surface as
    /// an execution error.
    pub fn matches(&self, row: &indexmap::IndexMap<String, Value>) -> crate::Result<bool> {
        match self {
            Self::Eq { column, value, .. } => {
                Ok(row.get(column).is_some_and(|actual| actual == value))
            }
            Self::And(conditions) => {
                for condition in conditions {
                    if !condition.matches(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(conditions) => {
                for condition in conditions {
                    if condition.matches(row)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Raw(fragment) => Err(crate::Error::execution(format!(
                "raw predicate `{fragment}` cannot be evaluated in memory"
            ))),
        }
    }
}
