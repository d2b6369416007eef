use super::Statement;

use crate::schema::ViewIndex;

/// `DROP INDEX {name}`
///
/// Deliberately carries no `IF EXISTS` guard: dropping an index that does not
/// exist must surface as a distinguishable failure, not a silent success.
#[derive(Debug, Clone)]
pub struct DropIndex {
    /// Name of the index to drop
    pub name: String,
}

impl Statement {
    pub fn drop_index(index: &ViewIndex, table_name: &str) -> Self {
        DropIndex {
            name: index.index_name(table_name),
        }
        .into()
    }
}

impl From<DropIndex> for Statement {
    fn from(value: DropIndex) -> Self {
        Self::DropIndex(value)
    }
}
