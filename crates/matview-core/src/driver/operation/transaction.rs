use super::Operation;

/// Transaction control. Every lifecycle operation runs between exactly one
/// `Start` and one `Commit`, with `Rollback` on any failure; nesting is not
/// part of the model and drivers reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Operation::Transaction(value)
    }
}
