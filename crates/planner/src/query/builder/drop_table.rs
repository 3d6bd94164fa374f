use crate::query::ast::{common::TableRef, drop_table::DropTable};

/// Builds the `DROP TABLE` that clears a reference table before it is
/// recreated. `if_exists` guards it with an `OBJECT_ID` check so a first run
/// against an empty database succeeds.
#[derive(Debug, Clone)]
pub struct DropTableBuilder {
    ast: DropTable,
}

impl DropTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: DropTable {
                table,
                if_exists: false,
            },
        }
    }

    pub fn if_exists(mut self) -> Self {
        self.ast.if_exists = true;
        self
    }

    pub fn build(self) -> DropTable {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::{dialect::SqlServer, renderer::render},
        table_ref,
    };

    #[test]
    fn test_unguarded_drop() {
        let ast = DropTableBuilder::new(table_ref!("BCPTest")).build();
        assert_eq!(render(&ast, &SqlServer), "DROP TABLE [BCPTest];");
    }

    #[test]
    fn test_guarded_drop_quotes_names_inside_object_id() {
        let ast = DropTableBuilder::new(table_ref!("dbo", "it's]odd"))
            .if_exists()
            .build();
        assert_eq!(
            render(&ast, &SqlServer),
            "IF OBJECT_ID('[dbo].[it''s]]odd]', 'U') IS NOT NULL DROP TABLE [dbo].[it's]]odd];"
        );
    }
}
