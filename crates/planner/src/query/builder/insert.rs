use crate::query::{
    ast::{common::TableRef, insert::Insert},
    value,
};
use model::{SqlType, Value};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
    column_types: Vec<SqlType>,
}

impl InsertBuilder {
    /// Starts an insert into a table whose columns have `column_types`, in
    /// table order.
    pub fn new(table: TableRef, column_types: Vec<SqlType>) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
            column_types,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.ast.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Adds a row. Values beyond the known column types are dropped and
    /// missing trailing values are written as `NULL`.
    pub fn row(mut self, row: &[Option<Value>]) -> Self {
        let exprs = self
            .column_types
            .iter()
            .enumerate()
            .map(|(i, data_type)| value(row.get(i).and_then(Option::as_ref), *data_type))
            .collect();
        self.ast.values.push(exprs);
        self
    }

    pub fn rows<'a, I>(self, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a [Option<Value>]>,
    {
        rows.into_iter().fold(self, |builder, row| builder.row(row))
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
