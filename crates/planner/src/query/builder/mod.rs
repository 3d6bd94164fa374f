pub mod create_table;
pub mod drop_table;
pub mod insert;
