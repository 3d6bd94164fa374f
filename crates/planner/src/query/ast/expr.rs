use model::{SqlType, Value};

/// A value expression inside a statement.
///
/// Values carry the type of the column they are written to, which decides
/// their literal form.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(Value, SqlType),
    Null,
}
