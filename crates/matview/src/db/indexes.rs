use super::Db;

use crate::driver::operation::InsertIndex;
use crate::stmt::Statement;
use crate::Result;

use jiff::Timestamp;
use matview_core::schema::{IndexId, IndexMethod, MaterializedView, ViewIndex};

/// Everything the operator supplies to define an index on a view.
#[derive(Debug, Clone)]
pub struct IndexDef {
    pub title: String,

    /// Column on the materialized table; trusted operator input
    pub column: String,

    pub method: IndexMethod,
    pub unique: bool,
    pub created_by: Option<String>,
}

impl Db {
    /// Persists a new index descriptor row and appends it to the view's
    /// ordered collection. Metadata only: the physical index is created by
    /// [`Db::create`] cascading over the collection, or by
    /// [`Db::create_index`] directly.
    pub async fn add_index(&self, view: &mut MaterializedView, def: IndexDef) -> Result<IndexId> {
        let index = ViewIndex {
            id: IndexId::generate(),
            title: def.title,
            view: view.id,
            method: def.method,
            column: def.column,
            unique: def.unique,
            created_by: def.created_by,
            created_at: Timestamp::now(),
        };

        self.begin().await?;
        let result = self
            .exec(InsertIndex {
                index: index.clone(),
            })
            .await
            .map(|_| ());
        self.finish(result).await?;

        let id = index.id;
        view.indexes.push(index);
        Ok(id)
    }

    /// Creates the physical index. The owning view is resolved through the
    /// index's weak back-reference to obtain the table name; the DDL fails
    /// naturally when that table does not exist. Idempotent.
    pub async fn create_index(&self, index: &ViewIndex) -> Result<()> {
        let owner = self.get_view(index.view).await?;

        self.begin().await?;
        let result = self
            .exec(Statement::create_index(index, &owner.table_name))
            .await
            .map(|_| ());
        self.finish(result).await
    }

    /// Drops the physical index. NOT idempotent: no `IF EXISTS` guard, so
    /// dropping an index that does not exist fails with a not-found error
    /// rather than silently succeeding.
    pub async fn drop_index(&self, index: &ViewIndex) -> Result<()> {
        let owner = self.get_view(index.view).await?;

        self.begin().await?;
        let result = self
            .exec(Statement::drop_index(index, &owner.table_name))
            .await
            .map(|_| ());
        self.finish(result).await
    }
}
