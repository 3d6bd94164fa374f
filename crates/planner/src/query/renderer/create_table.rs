use crate::query::{
    ast::create_table::CreateTable,
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(&column.name));
            r.sql.push(' ');
            r.sql.push_str(&r.dialect.render_data_type(&column.data_type));
            if !column.is_nullable {
                r.sql.push_str(" NOT NULL");
            }
        }
        r.sql.push_str(");");
    }
}

#[cfg(test)]
mod tests {
    use crate::table_ref;
    use crate::query::{
        ast::create_table::{ColumnDef, CreateTable},
        dialect::SqlServer,
        renderer::render,
    };
    use model::SqlType;

    #[test]
    fn test_render_create_table() {
        let ast = CreateTable {
            table: table_ref!("BCPTest"),
            columns: vec![
                ColumnDef {
                    name: "col0".to_string(),
                    data_type: SqlType::nchar(10).unwrap(),
                    is_nullable: true,
                },
                ColumnDef {
                    name: "col1".to_string(),
                    data_type: SqlType::Int,
                    is_nullable: false,
                },
            ],
        };

        assert_eq!(
            render(&ast, &SqlServer),
            "CREATE TABLE [BCPTest] ([col0] nchar(10), [col1] int NOT NULL);"
        );
    }
}
