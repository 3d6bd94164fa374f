use crate::query::ast::expr::Expr;
use model::{SqlType, Value};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

pub fn value(val: Option<&Value>, data_type: SqlType) -> Expr {
    match val {
        Some(v) => Expr::Value(v.clone(), data_type),
        None => Expr::Null,
    }
}
