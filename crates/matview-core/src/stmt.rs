mod create_index;
pub use create_index::CreateIndex;

mod create_materialized_view;
pub use create_materialized_view::CreateMaterializedView;

mod drop_index;
pub use drop_index::DropIndex;

mod drop_materialized_view;
pub use drop_materialized_view::DropMaterializedView;

mod refresh_materialized_view;
pub use refresh_materialized_view::RefreshMaterializedView;

/// A DDL statement against the materialized view's physical objects.
///
/// Statements are structured so SQL drivers can serialize them and in-process
/// drivers can interpret them. Identifier fields are trusted operator input
/// and pass through verbatim.
#[derive(Debug, Clone)]
pub enum Statement {
    CreateIndex(CreateIndex),
    CreateMaterializedView(CreateMaterializedView),
    DropIndex(DropIndex),
    DropMaterializedView(DropMaterializedView),
    RefreshMaterializedView(RefreshMaterializedView),
}
