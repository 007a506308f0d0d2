/// Driver-reported column type tag.
///
/// Only used to decide how a value is quoted or coerced when rendered into
/// SQL; rowgate never interprets the stored data beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Boolean,
    Integer,
    Float,
    Text,
    Timestamp,
}

impl Type {
    /// True if literals of this type are rendered bare (no surrounding quotes).
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}
