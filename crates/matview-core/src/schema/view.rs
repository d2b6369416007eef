use super::{SchedulerBinding, ViewIndex};

use jiff::Timestamp;
use std::fmt;
use uuid::Uuid;

/// The materialized view descriptor.
///
/// Ties together the three coupled resources the lifecycle operations keep
/// consistent: this persisted definition, the physical table named by
/// `table_name`, and the scheduler binding that drives periodic refresh.
#[derive(Debug, Clone)]
pub struct MaterializedView {
    /// Uniquely identifies the view descriptor
    pub id: ViewId,

    /// Human label, non-unique
    pub title: String,

    /// Name of the physical materialized view table.
    ///
    /// Used verbatim in generated DDL. Trusted operator input: no escaping or
    /// validation beyond what the database itself enforces.
    pub table_name: String,

    /// The SELECT statement materialized into the table. Trusted operator
    /// input, same as `table_name`.
    pub query_definition: String,

    /// Exclusively owned schedule entry that refreshes this view
    pub binding: SchedulerBinding,

    /// Owned indexes, ordered by creation
    pub indexes: Vec<ViewIndex>,

    /// Audit metadata, not used in control flow
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub last_run_at: Option<Timestamp>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ViewId(pub Uuid);

impl ViewId {
    pub fn generate() -> Self {
        ViewId(Uuid::new_v4())
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ViewId({})", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, fmt)
    }
}

impl std::str::FromStr for ViewId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ViewId(s.parse()?))
    }
}
