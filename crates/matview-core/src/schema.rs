mod binding;
pub use binding::{BindingId, SchedulerBinding};

mod index;
pub use index::{IndexId, IndexMethod, ViewIndex};

mod view;
pub use view::{MaterializedView, ViewId};
