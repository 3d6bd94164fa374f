use crate::query::{
    ast::expr::Expr,
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Value(value, data_type) => {
                let literal = r.dialect.render_literal(value, data_type);
                r.sql.push_str(&literal);
            }
            Expr::Null => r.sql.push_str("NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{ast::expr::Expr, dialect::SqlServer, renderer::render};
    use model::{SqlType, Value};

    #[test]
    fn test_render_literals() {
        let text = Value::Text("KIKOO".to_string());
        assert_eq!(
            render(&Expr::Value(text.clone(), SqlType::nchar(10).unwrap()), &SqlServer),
            "N'KIKOO'"
        );
        assert_eq!(
            render(&Expr::Value(text, SqlType::char(10).unwrap()), &SqlServer),
            "'KIKOO'"
        );
        assert_eq!(render(&Expr::Null, &SqlServer), "NULL");
    }
}
