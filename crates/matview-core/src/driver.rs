mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

pub mod transaction;
pub use transaction::TransactionTracker;

use crate::async_trait;

use std::fmt::Debug;

/// The storage boundary for materialized view management.
///
/// A driver executes DDL against the database (untyped pass-through of
/// operator-assembled statements) and persists descriptor, index, and
/// scheduler binding rows. Both concerns live behind one connection so a
/// lifecycle operation's transaction covers them together.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a database operation
    async fn exec(&self, op: Operation) -> crate::Result<Response>;
}
