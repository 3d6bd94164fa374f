pub mod common;
pub mod create_database;
pub mod create_table;
pub mod drop_table;
pub mod expr;
pub mod insert;
