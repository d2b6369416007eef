use super::Operation;

use crate::schema::MaterializedView;

/// Persists the view row itself. The binding row must already exist (it is
/// inserted first, in the same transaction); drivers store only the binding's
/// id from the embedded aggregate.
#[derive(Debug)]
pub struct InsertView {
    pub view: MaterializedView,
}

impl From<InsertView> for Operation {
    fn from(value: InsertView) -> Self {
        Operation::InsertView(value)
    }
}
