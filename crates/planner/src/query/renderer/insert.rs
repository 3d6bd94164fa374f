use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO table [(...)]
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        if !self.columns.is_empty() {
            r.sql.push_str(" (");
            let quoted_columns: Vec<String> = self
                .columns
                .iter()
                .map(|c| r.dialect.quote_identifier(c))
                .collect();
            r.sql.push_str(&quoted_columns.join(", "));
            r.sql.push(')');
        }

        // 2. VALUES (...), (...)
        render_values(self, r);
        r.sql.push(';');
    }
}

fn render_values(insert: &Insert, r: &mut Renderer) {
    r.sql.push_str(" VALUES ");
    for (i, row) in insert.values.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        r.sql.push('(');
        for (j, val) in row.iter().enumerate() {
            if j > 0 {
                r.sql.push_str(", ");
            }
            val.render(r);
        }
        r.sql.push(')');
    }
}
