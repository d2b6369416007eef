use std::{fmt, time::Duration};
use uuid::Uuid;

/// One schedule entry polled by the opaque periodic-task runner.
///
/// The core writes `action` and `args` once when a descriptor is first
/// persisted, and toggles `enabled` as the physical table comes and goes. The
/// interval itself is operator-supplied and never interpreted here.
#[derive(Debug, Clone)]
pub struct SchedulerBinding {
    pub id: BindingId,

    /// How often the runner invokes the bound action
    pub interval: Duration,

    /// Whether the runner may invoke the action. True only while the physical
    /// table is known to exist.
    pub enabled: bool,

    /// Identifier of the action the runner dispatches to. `None` until the
    /// binding is linked to a descriptor.
    pub action: Option<String>,

    /// Arguments passed to the action, JSON-encoded
    pub args: serde_json::Value,
}

impl SchedulerBinding {
    /// A fresh, unlinked, disabled binding. The binding must exist before the
    /// descriptor row referencing it can be persisted.
    pub fn new(interval: Duration) -> SchedulerBinding {
        SchedulerBinding {
            id: BindingId::generate(),
            interval,
            enabled: false,
            action: None,
            args: serde_json::Value::Null,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BindingId(pub Uuid);

impl BindingId {
    pub fn generate() -> Self {
        BindingId(Uuid::new_v4())
    }
}

impl fmt::Debug for BindingId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "BindingId({})", self.0)
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, fmt)
    }
}

impl std::str::FromStr for BindingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BindingId(s.parse()?))
    }
}
