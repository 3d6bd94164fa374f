use crate::query::ast::{
    common::TableRef,
    create_table::{ColumnDef, CreateTable},
};
use model::SqlType;

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    ast: CreateTable,
}

impl CreateTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: CreateTable {
                table,
                columns: Vec::new(),
            },
        }
    }

    /// Adds a nullable column.
    pub fn column(mut self, name: &str, data_type: SqlType) -> Self {
        self.ast.columns.push(ColumnDef {
            name: name.to_string(),
            data_type,
            is_nullable: true,
        });
        self
    }

    /// Adds nullable columns named `col0`, `col1`, ... in order.
    pub fn numbered_columns(self, data_types: &[SqlType]) -> Self {
        data_types
            .iter()
            .enumerate()
            .fold(self, |builder, (i, data_type)| {
                builder.column(&format!("col{i}"), *data_type)
            })
    }

    pub fn build(self) -> CreateTable {
        self.ast
    }
}
