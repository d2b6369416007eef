use super::Operation;

use crate::schema::ViewId;

/// Resolves a descriptor aggregate: the view row, its binding row, and its
/// index rows in creation order. Fails with a not-found error when the id no
/// longer exists.
#[derive(Debug)]
pub struct GetView {
    pub id: ViewId,
}

impl From<GetView> for Operation {
    fn from(value: GetView) -> Self {
        Operation::GetView(value)
    }
}
