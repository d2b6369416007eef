use crate::stmt::{
    CreateIndex, CreateMaterializedView, DropIndex, DropMaterializedView,
    RefreshMaterializedView, Statement,
};

/// Serialize a statement to a SQL string (PostgreSQL flavor).
///
/// Identifiers and the query definition are interpolated verbatim: they are
/// trusted operator input, and this serializer performs no quoting or
/// escaping beyond assembling the statement shape.
#[derive(Debug)]
pub struct Serializer {
    _private: (),
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer { _private: () }
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter { dst: &mut ret };
        fmt.statement(stmt);

        ret.push(';');
        ret
    }
}

impl Formatter<'_> {
    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::CreateIndex(stmt) => self.create_index(stmt),
            Statement::CreateMaterializedView(stmt) => self.create_materialized_view(stmt),
            Statement::DropIndex(stmt) => self.drop_index(stmt),
            Statement::DropMaterializedView(stmt) => self.drop_materialized_view(stmt),
            Statement::RefreshMaterializedView(stmt) => self.refresh_materialized_view(stmt),
        }
    }

    fn create_materialized_view(&mut self, stmt: &CreateMaterializedView) {
        self.push("CREATE MATERIALIZED VIEW IF NOT EXISTS ");
        self.push(&stmt.table_name);
        self.push(" AS ");
        self.push(&stmt.query_definition);
    }

    fn refresh_materialized_view(&mut self, stmt: &RefreshMaterializedView) {
        self.push("REFRESH MATERIALIZED VIEW CONCURRENTLY ");
        self.push(&stmt.table_name);
    }

    fn drop_materialized_view(&mut self, stmt: &DropMaterializedView) {
        self.push("DROP MATERIALIZED VIEW IF EXISTS ");
        self.push(&stmt.table_name);
    }

    fn create_index(&mut self, stmt: &CreateIndex) {
        self.push("CREATE ");
        if stmt.unique {
            self.push("UNIQUE ");
        }
        self.push("INDEX IF NOT EXISTS ");
        self.push(&stmt.name);
        self.push(" ON ");
        self.push(&stmt.on);
        self.push(" USING ");
        self.push(stmt.method.sql_name());
        self.push("(");
        self.push(&stmt.column);
        self.push(")");
    }

    fn drop_index(&mut self, stmt: &DropIndex) {
        // No IF EXISTS: a missing index must fail, not silently succeed.
        self.push("DROP INDEX ");
        self.push(&stmt.name);
    }

    fn push(&mut self, s: &str) {
        self.dst.push_str(s);
    }
}
