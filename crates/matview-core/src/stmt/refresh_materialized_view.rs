use super::Statement;

use crate::schema::MaterializedView;

/// `REFRESH MATERIALIZED VIEW CONCURRENTLY {table_name}`
///
/// Always concurrent so reads against the view keep working during the
/// rebuild. The database requires a unique index on the table for this and
/// rejects the statement otherwise.
#[derive(Debug, Clone)]
pub struct RefreshMaterializedView {
    /// Name of the table to refresh
    pub table_name: String,
}

impl Statement {
    pub fn refresh_materialized_view(view: &MaterializedView) -> Self {
        RefreshMaterializedView {
            table_name: view.table_name.clone(),
        }
        .into()
    }
}

impl From<RefreshMaterializedView> for Statement {
    fn from(value: RefreshMaterializedView) -> Self {
        Self::RefreshMaterializedView(value)
    }
}
