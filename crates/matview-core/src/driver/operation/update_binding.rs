use super::Operation;

use crate::schema::SchedulerBinding;

#[derive(Debug)]
pub struct UpdateBinding {
    pub binding: SchedulerBinding,
}

impl From<UpdateBinding> for Operation {
    fn from(value: UpdateBinding) -> Self {
        Operation::UpdateBinding(value)
    }
}
