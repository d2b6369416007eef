use super::Operation;

use crate::stmt::Statement;

/// One DDL statement, executed as untyped pass-through: the driver serializes
/// (or interprets) it, runs it, and surfaces the database's error unchanged
/// on failure.
#[derive(Debug)]
pub struct Ddl {
    pub statement: Statement,
}

impl From<Statement> for Operation {
    fn from(statement: Statement) -> Self {
        Operation::Ddl(Ddl { statement })
    }
}

impl From<Ddl> for Operation {
    fn from(value: Ddl) -> Self {
        Operation::Ddl(value)
    }
}
