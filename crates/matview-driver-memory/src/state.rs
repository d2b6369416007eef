use indexmap::IndexMap;

use jiff::Timestamp;
use matview_core::schema::{
    BindingId, IndexId, IndexMethod, MaterializedView, SchedulerBinding, ViewId, ViewIndex,
};

/// Everything the driver stores: descriptor rows and the modeled physical
/// objects. Cloneable so a transaction can snapshot it wholesale.
#[derive(Debug, Default, Clone)]
pub(crate) struct State {
    pub(crate) views: IndexMap<ViewId, ViewRow>,
    pub(crate) bindings: IndexMap<BindingId, SchedulerBinding>,

    /// Index rows in creation order
    pub(crate) indexes: IndexMap<IndexId, ViewIndex>,

    /// Physical materialized view tables
    pub(crate) tables: IndexMap<String, Table>,
}

/// The persisted view row. The binding and index rows live in their own maps;
/// the row stores only the binding's id, the way a foreign key would.
#[derive(Debug, Clone)]
pub(crate) struct ViewRow {
    pub(crate) id: ViewId,
    pub(crate) title: String,
    pub(crate) table_name: String,
    pub(crate) query_definition: String,
    pub(crate) binding: BindingId,
    pub(crate) created_by: Option<String>,
    pub(crate) created_at: Timestamp,
    pub(crate) last_run_at: Option<Timestamp>,
}

impl ViewRow {
    pub(crate) fn from_view(view: &MaterializedView) -> ViewRow {
        ViewRow {
            id: view.id,
            title: view.title.clone(),
            table_name: view.table_name.clone(),
            query_definition: view.query_definition.clone(),
            binding: view.binding.id,
            created_by: view.created_by.clone(),
            created_at: view.created_at,
            last_run_at: view.last_run_at,
        }
    }

    pub(crate) fn assemble(
        &self,
        binding: SchedulerBinding,
        indexes: Vec<ViewIndex>,
    ) -> MaterializedView {
        MaterializedView {
            id: self.id,
            title: self.title.clone(),
            table_name: self.table_name.clone(),
            query_definition: self.query_definition.clone(),
            binding,
            indexes,
            created_by: self.created_by.clone(),
            created_at: self.created_at,
            last_run_at: self.last_run_at,
        }
    }
}

/// A physical table and its physical indexes.
#[derive(Debug, Default, Clone)]
pub(crate) struct Table {
    pub(crate) indexes: IndexMap<String, PhysicalIndex>,
}

/// How a physical index looks to introspection.
#[derive(Debug, Clone)]
pub struct PhysicalIndex {
    pub column: String,
    pub method: IndexMethod,
    pub unique: bool,
}
