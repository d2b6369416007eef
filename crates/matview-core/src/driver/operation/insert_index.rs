use super::Operation;

use crate::schema::ViewIndex;

#[derive(Debug)]
pub struct InsertIndex {
    pub index: ViewIndex,
}

impl From<InsertIndex> for Operation {
    fn from(value: InsertIndex) -> Self {
        Operation::InsertIndex(value)
    }
}
