use crate::{pk::ResolvedKey, stmt::Predicate, stmt::Value, Error};

use indexmap::IndexMap;
use rowgate_core::schema::ColumnMetadata;

/// One complete assignment of values to a table's primary-key columns, in
/// primary-key order.
///
/// Returned by [`TableGateway::insert`](crate::TableGateway::insert) and
/// accepted back by `find`, so an insert→find round trip composes directly.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValueSet {
    /// The key has a single column
    Single(Value),

    /// Ordered column → value pairs of a composite key
    Composite(IndexMap<String, Value>),
}

impl KeyValueSet {
    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Self::Single(value) => Some(value),
            Self::Composite(_) => None,
        }
    }

    /// The key values in primary-key column order.
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value.clone()],
            Self::Composite(map) => map.values().cloned().collect(),
        }
    }
}

/// One or more fixed-arity primary-key value tuples, normalized at the `find`
/// boundary before any predicate work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    tuples: Vec<Vec<Value>>,
}

impl KeySet {
    /// A key set with no tuples; `find` maps it to an empty rowset without
    /// querying the store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw tuples, for callers assembling keys dynamically. Arity consistency
    /// is checked by `find`.
    pub fn from_tuples(tuples: Vec<Vec<Value>>) -> Self {
        Self { tuples }
    }

    pub fn tuples(&self) -> &[Vec<Value>] {
        &self.tuples
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Rejects tuples whose arity does not match the primary key. Fails fast,
    /// before any predicate assembly.
    pub(crate) fn check_arity(&self, expected: usize, table: &str) -> crate::Result<()> {
        for tuple in &self.tuples {
            if tuple.len() != expected {
                return Err(Error::key_arity(format!(
                    "table {}: expected {} value(s) for the primary key, got {}",
                    table,
                    expected,
                    tuple.len()
                )));
            }
        }
        Ok(())
    }
}

/// Conversion into a normalized [`KeySet`].
///
/// Implemented for scalars (one single-column key), tuples of up to four
/// values (one composite key), `Vec`s of either (many keys), `KeyValueSet`,
/// and `KeySet` itself.
pub trait IntoKeys {
    fn into_keys(self) -> KeySet;
}

impl IntoKeys for KeySet {
    fn into_keys(self) -> KeySet {
        self
    }
}

impl IntoKeys for KeyValueSet {
    fn into_keys(self) -> KeySet {
        KeySet {
            tuples: vec![self.values()],
        }
    }
}

impl IntoKeys for Vec<KeyValueSet> {
    fn into_keys(self) -> KeySet {
        KeySet {
            tuples: self.into_iter().map(|key| key.values()).collect(),
        }
    }
}

macro_rules! scalar_keys {
    ( $( $ty:ty ),+ ) => {
        $(
            impl IntoKeys for $ty {
                fn into_keys(self) -> KeySet {
                    KeySet {
                        tuples: vec![vec![self.into()]],
                    }
                }
            }

            impl IntoKeys for Vec<$ty> {
                fn into_keys(self) -> KeySet {
                    KeySet {
                        tuples: self.into_iter().map(|value| vec![value.into()]).collect(),
                    }
                }
            }
        )+
    };
}

scalar_keys!(Value, bool, i32, i64, f64, String, &str);

macro_rules! tuple_keys {
    ( $( ( $($name:ident),+ ) ),+ ) => {
        $(
            #[allow(non_snake_case)]
            impl<$($name: Into<Value>),+> IntoKeys for ($($name,)+) {
                fn into_keys(self) -> KeySet {
                    let ($($name,)+) = self;
                    KeySet {
                        tuples: vec![vec![$($name.into()),+]],
                    }
                }
            }

            #[allow(non_snake_case)]
            impl<$($name: Into<Value>),+> IntoKeys for Vec<($($name,)+)> {
                fn into_keys(self) -> KeySet {
                    KeySet {
                        tuples: self
                            .into_iter()
                            .map(|($($name,)+)| vec![$($name.into()),+])
                            .collect(),
                    }
                }
            }
        )+
    };
}

tuple_keys!((A, B), (A, B, C), (A, B, C, D));

/// Builds the disjunctive-normal-form lookup predicate: one AND-group per
/// tuple, OR-combined. `None` for an empty key set.
pub(crate) fn key_predicate(
    key: &ResolvedKey,
    columns: &IndexMap<String, ColumnMetadata>,
    keys: &KeySet,
) -> Option<Predicate> {
    if keys.is_empty() {
        return None;
    }

    let groups = keys
        .tuples
        .iter()
        .map(|tuple| {
            Predicate::and(
                key.columns
                    .iter()
                    .zip(tuple)
                    .map(|(column, value)| {
                        Predicate::eq(column.clone(), value.clone(), columns[column].ty)
                    })
                    .collect(),
            )
        })
        .collect();

    Some(Predicate::or(groups))
}
