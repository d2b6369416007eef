use super::Operation;

use crate::schema::ViewId;

use jiff::Timestamp;

#[derive(Debug)]
pub struct UpdateLastRun {
    pub id: ViewId,
    pub at: Timestamp,
}

impl From<UpdateLastRun> for Operation {
    fn from(value: UpdateLastRun) -> Self {
        Operation::UpdateLastRun(value)
    }
}
