use crate::query::{
    ast::create_database::CreateDatabase,
    renderer::{Render, Renderer},
};

impl Render for CreateDatabase {
    fn render(&self, r: &mut Renderer) {
        if self.if_not_exists {
            r.sql.push_str("IF DB_ID(");
            r.sql.push_str(&r.dialect.quote_string(&self.name));
            r.sql.push_str(") IS NULL ");
        }
        r.sql.push_str("CREATE DATABASE ");
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
        r.sql.push(';');
    }
}
