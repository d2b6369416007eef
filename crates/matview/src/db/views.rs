use super::Db;

use crate::driver::operation::{DeleteBinding, DeleteView, InsertBinding, InsertView, UpdateBinding, UpdateLastRun};
use crate::stmt::Statement;
use crate::task;
use crate::{Error, Result};

use jiff::Timestamp;
use matview_core::schema::{MaterializedView, SchedulerBinding, ViewId};

use std::time::Duration;

/// Everything the operator supplies to define a new materialized view.
///
/// `table_name` and `query_definition` are used verbatim in generated DDL;
/// they are trusted operator input, not end-user input.
#[derive(Debug, Clone)]
pub struct ViewDef {
    pub title: String,
    pub table_name: String,
    pub query_definition: String,

    /// How often the scheduler should refresh the view once enabled
    pub interval: Duration,

    pub created_by: Option<String>,
}

impl Db {
    /// Persists a new view descriptor.
    ///
    /// One transaction: insert the binding row, insert the view row, then
    /// link the binding to the refresh task (disabled — the physical table
    /// does not exist yet). This is the explicit form of the original
    /// post-save hook: callers get a descriptor whose binding is always
    /// already linked.
    pub async fn save_view(&self, def: ViewDef) -> Result<MaterializedView> {
        let mut view = MaterializedView {
            id: ViewId::generate(),
            title: def.title,
            table_name: def.table_name,
            query_definition: def.query_definition,
            binding: SchedulerBinding::new(def.interval),
            indexes: vec![],
            created_by: def.created_by,
            created_at: Timestamp::now(),
            last_run_at: None,
        };

        self.begin().await?;
        let result = self.save_view_in_tx(&mut view).await;
        self.finish(result).await?;

        Ok(view)
    }

    async fn save_view_in_tx(&self, view: &mut MaterializedView) -> Result<()> {
        self.exec(InsertBinding {
            binding: view.binding.clone(),
        })
        .await?;
        self.exec(InsertView { view: view.clone() }).await?;

        let linked = linked_binding(view);
        self.exec(UpdateBinding {
            binding: linked.clone(),
        })
        .await?;
        view.binding = linked;

        Ok(())
    }

    /// Points the binding at the refresh task with this descriptor's id and
    /// forces it disabled, since the physical table does not exist yet.
    ///
    /// No-op when the binding is already correctly linked, so re-invoking on
    /// subsequent saves never issues a redundant write.
    pub async fn link_scheduler_binding(&self, view: &mut MaterializedView) -> Result<()> {
        if is_linked(view) {
            return Ok(());
        }

        let linked = linked_binding(view);
        self.begin().await?;
        let result = self
            .exec(UpdateBinding {
                binding: linked.clone(),
            })
            .await
            .map(|_| ());
        self.finish(result).await?;
        view.binding = linked;

        Ok(())
    }

    /// Creates the physical materialized view table, its indexes, and enables
    /// the periodic refresh, all in one transaction.
    ///
    /// Idempotent: the table and index statements carry `IF NOT EXISTS`, so
    /// repeating a successful `create` leaves the same end state. If any step
    /// fails, the table, the indexes, and the enabled flag all roll back
    /// together.
    pub async fn create(&self, view: &mut MaterializedView) -> Result<()> {
        self.begin().await?;
        let result = self.create_in_tx(view).await;
        self.finish(result).await?;
        view.binding.enabled = true;

        Ok(())
    }

    async fn create_in_tx(&self, view: &MaterializedView) -> Result<()> {
        self.exec(Statement::create_materialized_view(view)).await?;

        for index in &view.indexes {
            self.exec(Statement::create_index(index, &view.table_name))
                .await?;
        }

        if !view.binding.enabled {
            let mut binding = view.binding.clone();
            binding.enabled = true;
            self.exec(UpdateBinding { binding }).await?;
        }

        Ok(())
    }

    /// Concurrently refreshes the materialized view table.
    ///
    /// The database requires a unique index on the table; without one, or
    /// without the table, this fails with a refresh error. No retry: the
    /// failure surfaces to the caller (or the scheduler's run log).
    pub async fn refresh(&self, view: &mut MaterializedView) -> Result<()> {
        let at = Timestamp::now();

        self.begin().await?;
        let result = self.refresh_in_tx(view, at).await;
        match self.finish(result).await {
            Ok(()) => {
                view.last_run_at = Some(at);
                Ok(())
            }
            // A vanished table is a refresh precondition failure
            Err(err) if err.is_not_found() => Err(err.context(Error::refresh(format!(
                "refresh of `{}` failed",
                view.table_name
            )))),
            Err(err) => Err(err),
        }
    }

    async fn refresh_in_tx(&self, view: &MaterializedView, at: Timestamp) -> Result<()> {
        self.exec(Statement::refresh_materialized_view(view)).await?;
        self.exec(UpdateLastRun { id: view.id, at }).await?;
        Ok(())
    }

    /// Drops the physical table and disables the periodic refresh, in one
    /// transaction. Idempotent.
    ///
    /// Index metadata rows are deliberately left in place: dropping the table
    /// drops its physical indexes at the database level, and the descriptors
    /// are reconciled by the caller if desired.
    pub async fn drop(&self, view: &mut MaterializedView) -> Result<()> {
        self.begin().await?;
        let result = self.drop_in_tx(view).await;
        self.finish(result).await?;
        view.binding.enabled = false;

        Ok(())
    }

    async fn drop_in_tx(&self, view: &MaterializedView) -> Result<()> {
        self.exec(Statement::drop_materialized_view(view)).await?;

        if view.binding.enabled {
            let mut binding = view.binding.clone();
            binding.enabled = false;
            self.exec(UpdateBinding { binding }).await?;
        }

        Ok(())
    }

    /// Fully removes the descriptor: drops the physical table, deletes the
    /// binding row, deletes the view row (index rows cascade). All three
    /// succeed or none do.
    pub async fn delete(&self, view: MaterializedView) -> Result<()> {
        self.begin().await?;
        let result = self.delete_in_tx(&view).await;
        self.finish(result).await
    }

    async fn delete_in_tx(&self, view: &MaterializedView) -> Result<()> {
        self.drop_in_tx(view).await?;
        self.exec(DeleteBinding {
            id: view.binding.id,
        })
        .await?;
        self.exec(DeleteView { id: view.id }).await?;
        Ok(())
    }

    /// Enables the periodic refresh. No-op (no write) when already enabled,
    /// which matters for the scheduler's change detection.
    pub async fn enable_periodic_refresh(&self, view: &mut MaterializedView) -> Result<()> {
        self.set_periodic_refresh(view, true).await
    }

    /// Disables the periodic refresh. No-op when already disabled.
    pub async fn disable_periodic_refresh(&self, view: &mut MaterializedView) -> Result<()> {
        self.set_periodic_refresh(view, false).await
    }

    async fn set_periodic_refresh(
        &self,
        view: &mut MaterializedView,
        enabled: bool,
    ) -> Result<()> {
        if view.binding.enabled == enabled {
            return Ok(());
        }

        let mut binding = view.binding.clone();
        binding.enabled = enabled;

        self.begin().await?;
        let result = self
            .exec(UpdateBinding {
                binding: binding.clone(),
            })
            .await
            .map(|_| ());
        self.finish(result).await?;
        view.binding = binding;

        Ok(())
    }
}

fn is_linked(view: &MaterializedView) -> bool {
    view.binding.action.as_deref() == Some(task::REFRESH_MATERIALIZED_VIEW)
        && view.binding.args == task::action_args(view.id)
}

fn linked_binding(view: &MaterializedView) -> SchedulerBinding {
    let mut binding = view.binding.clone();
    binding.action = Some(task::REFRESH_MATERIALIZED_VIEW.to_string());
    binding.args = task::action_args(view.id);
    binding.enabled = false;
    binding
}
