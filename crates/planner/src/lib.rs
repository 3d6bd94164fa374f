//! T-SQL statements used to build reference tables on a live server.

pub mod query;
pub mod script;
