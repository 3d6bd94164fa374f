/// `CREATE DATABASE`, optionally guarded so an existing database is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabase {
    pub name: String,
    pub if_not_exists: bool,
}
