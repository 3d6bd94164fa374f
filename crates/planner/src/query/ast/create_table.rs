//! Defines the AST for a CREATE TABLE statement.

use crate::query::ast::common::TableRef;
use model::SqlType;

/// Represents a complete CREATE TABLE statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    pub table: TableRef,
    pub columns: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: SqlType,
    pub is_nullable: bool,
}
