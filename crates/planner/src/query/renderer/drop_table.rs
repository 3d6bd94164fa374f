use crate::query::{
    ast::drop_table::DropTable,
    renderer::{Render, Renderer},
};

impl Render for DropTable {
    fn render(&self, r: &mut Renderer) {
        if self.if_exists {
            // OBJECT_ID parses its argument as a multi-part name, so the parts
            // stay bracket-quoted inside the string literal.
            let mut name = Renderer::new(r.dialect);
            name.render_table_ref(&self.table);
            r.sql.push_str("IF OBJECT_ID(");
            r.sql.push_str(&r.dialect.quote_string(&name.finish()));
            r.sql.push_str(", 'U') IS NOT NULL ");
        }
        r.sql.push_str("DROP TABLE ");
        r.render_table_ref(&self.table);
        r.sql.push(';');
    }
}
