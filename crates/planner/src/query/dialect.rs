//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::{SqlType, Value};

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Wraps text in string-literal quotes, escaping embedded quotes.
    fn quote_string(&self, text: &str) -> String;

    /// Renders a column type as it appears in a column definition.
    fn render_data_type(&self, data_type: &SqlType) -> String;

    /// Renders `value` as an inline literal for a column of `data_type`.
    fn render_literal(&self, value: &Value, data_type: &SqlType) -> String;
}

/// Microsoft SQL Server (T-SQL).
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }

    fn quote_string(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    fn render_data_type(&self, data_type: &SqlType) -> String {
        data_type.sql_name().into_owned()
    }

    fn render_literal(&self, value: &Value, data_type: &SqlType) -> String {
        value.to_sql_literal(data_type)
    }
}
