use super::Operation;

use crate::schema::BindingId;

#[derive(Debug)]
pub struct DeleteBinding {
    pub id: BindingId,
}

impl From<DeleteBinding> for Operation {
    fn from(value: DeleteBinding) -> Self {
        Operation::DeleteBinding(value)
    }
}
