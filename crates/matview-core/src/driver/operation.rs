mod ddl;
pub use ddl::Ddl;

mod delete_binding;
pub use delete_binding::DeleteBinding;

mod delete_view;
pub use delete_view::DeleteView;

mod get_view;
pub use get_view::GetView;

mod insert_binding;
pub use insert_binding::InsertBinding;

mod insert_index;
pub use insert_index::InsertIndex;

mod insert_view;
pub use insert_view::InsertView;

mod transaction;
pub use transaction::Transaction;

mod update_binding;
pub use update_binding::UpdateBinding;

mod update_last_run;
pub use update_last_run::UpdateLastRun;

#[derive(Debug)]
pub enum Operation {
    /// Execute one DDL statement against the database
    Ddl(Ddl),

    /// Delete a scheduler binding row
    DeleteBinding(DeleteBinding),

    /// Delete a view descriptor row; owned index rows cascade
    DeleteView(DeleteView),

    /// Resolve a view descriptor by id
    GetView(GetView),

    /// Persist a new scheduler binding row
    InsertBinding(InsertBinding),

    /// Persist a new index descriptor row
    InsertIndex(InsertIndex),

    /// Persist a new view descriptor row
    InsertView(InsertView),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),

    /// Persist changed scheduler binding fields
    UpdateBinding(UpdateBinding),

    /// Record when a view was last refreshed
    UpdateLastRun(UpdateLastRun),
}
