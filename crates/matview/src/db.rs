mod indexes;
pub use indexes::IndexDef;

mod views;
pub use views::ViewDef;

use crate::driver::{
    operation::{GetView, Transaction},
    Driver, Operation, Response,
};
use crate::Result;

use matview_core::schema::{MaterializedView, ViewId};

use std::sync::Arc;

/// A handle to the record store and the database the views materialize into.
///
/// Every lifecycle operation runs inside exactly one driver transaction:
/// either all of its side effects commit, or the transaction rolls back and
/// the descriptor, binding, and physical objects are left untouched.
/// Descriptor structs held by the caller are only mutated after a successful
/// commit, so they never diverge from the store.
#[derive(Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
}

impl Db {
    pub fn new(driver: Arc<dyn Driver>) -> Db {
        Db { driver }
    }

    /// Connects to a database using a connection string (`memory://` or
    /// `postgresql://...`, depending on enabled features).
    pub async fn connect(url: &str) -> Result<Db> {
        Ok(Db {
            driver: crate::driver::connect(url).await?,
        })
    }

    /// Resolves a view descriptor by id. Fails with a not-found error when
    /// the id no longer exists, e.g. the view was deleted after a schedule
    /// fired but before the runner executed.
    pub async fn get_view(&self, id: ViewId) -> Result<MaterializedView> {
        self.exec(GetView { id }).await?.into_view()
    }

    pub(crate) async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        self.driver.exec(op.into()).await
    }

    pub(crate) async fn begin(&self) -> Result<()> {
        self.exec(Transaction::Start).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        self.exec(Transaction::Commit).await?;
        Ok(())
    }

    async fn rollback(&self) -> Result<()> {
        self.exec(Transaction::Rollback).await?;
        Ok(())
    }

    /// Commits on success; rolls back on failure, preserving the original
    /// error as the root cause if the rollback itself fails too.
    pub(crate) async fn finish<T>(&self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => match self.rollback().await {
                Ok(()) => Err(err),
                Err(rollback_err) => Err(err.context(rollback_err)),
            },
        }
    }
}
