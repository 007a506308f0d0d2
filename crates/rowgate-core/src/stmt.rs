mod predicate;
pub use predicate::Predicate;

mod statement;
pub use statement::{Assignment, Statement};

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;
