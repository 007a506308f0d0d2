/// How a missing identity value is produced at insert time.
///
/// An explicitly supplied identity value always wins: no generation step runs
/// for any strategy when the caller provides one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyGeneration {
    /// Before insert, fetch the next value from the named database sequence
    /// and inject it when the caller did not supply one.
    Sequence(String),

    /// Let the store generate the value; after insert, read the
    /// last-inserted-id when the caller did not supply one.
    Identity,

    /// Never generate. A missing identity value is the caller's concern, not
    /// an error at this layer.
    #[default]
    None,
}

impl KeyGeneration {
    pub fn sequence(name: impl Into<String>) -> Self {
        Self::Sequence(name.into())
    }
}
