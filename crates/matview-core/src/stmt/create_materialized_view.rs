use super::Statement;

use crate::schema::MaterializedView;

/// `CREATE MATERIALIZED VIEW IF NOT EXISTS {table_name} AS {query_definition}`
///
/// The `IF NOT EXISTS` guard is unconditional: re-creating an existing view
/// is success, not an error.
#[derive(Debug, Clone)]
pub struct CreateMaterializedView {
    /// Name of the table to materialize into
    pub table_name: String,

    /// The SELECT statement to materialize
    pub query_definition: String,
}

impl Statement {
    pub fn create_materialized_view(view: &MaterializedView) -> Self {
        CreateMaterializedView {
            table_name: view.table_name.clone(),
            query_definition: view.query_definition.clone(),
        }
        .into()
    }
}

impl From<CreateMaterializedView> for Statement {
    fn from(value: CreateMaterializedView) -> Self {
        Self::CreateMaterializedView(value)
    }
}
