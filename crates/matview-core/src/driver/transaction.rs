use super::operation::Transaction;

/// Tracks whether a transaction is open on a connection and maps control ops
/// to the SQL keyword. Drivers delegate their `Transaction` handling here so
/// nesting and unbalanced commits are rejected uniformly.
#[derive(Debug, Default)]
pub struct TransactionTracker {
    active: bool,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the statement to run for the control op, after validating the
    /// transition.
    pub fn apply(&mut self, op: Transaction) -> crate::Result<&'static str> {
        match op {
            Transaction::Start => {
                if self.active {
                    return Err(crate::err!("nested transactions are not supported"));
                }
                self.active = true;
                Ok("BEGIN")
            }
            Transaction::Commit => {
                if !self.active {
                    return Err(crate::err!("COMMIT without an open transaction"));
                }
                self.active = false;
                Ok("COMMIT")
            }
            Transaction::Rollback => {
                if !self.active {
                    return Err(crate::err!("ROLLBACK without an open transaction"));
                }
                self.active = false;
                Ok("ROLLBACK")
            }
        }
    }
}
