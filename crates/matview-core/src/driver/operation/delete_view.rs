use super::Operation;

use crate::schema::ViewId;

/// Deletes the descriptor row. Index rows referencing the view are removed by
/// the driver's cascade, mirroring a foreign key with cascade delete.
#[derive(Debug)]
pub struct DeleteView {
    pub id: ViewId,
}

impl From<DeleteView> for Operation {
    fn from(value: DeleteView) -> Self {
        Operation::DeleteView(value)
    }
}
