use super::Statement;

use crate::schema::MaterializedView;

/// `DROP MATERIALIZED VIEW IF EXISTS {table_name}`
///
/// The `IF EXISTS` guard is unconditional: dropping an already-dropped view
/// is idempotent.
#[derive(Debug, Clone)]
pub struct DropMaterializedView {
    /// Name of the table to drop
    pub table_name: String,
}

impl Statement {
    pub fn drop_materialized_view(view: &MaterializedView) -> Self {
        DropMaterializedView {
            table_name: view.table_name.clone(),
        }
        .into()
    }
}

impl From<DropMaterializedView> for Statement {
    fn from(value: DropMaterializedView) -> Self {
        Self::DropMaterializedView(value)
    }
}
