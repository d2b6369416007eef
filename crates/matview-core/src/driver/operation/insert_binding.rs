use super::Operation;

use crate::schema::SchedulerBinding;

#[derive(Debug)]
pub struct InsertBinding {
    pub binding: SchedulerBinding,
}

impl From<InsertBinding> for Operation {
    fn from(value: InsertBinding) -> Self {
        Operation::InsertBinding(value)
    }
}
