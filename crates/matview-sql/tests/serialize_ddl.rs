use matview_sql::{stmt::Statement, Serializer};

use jiff::Timestamp;
use matview_core::schema::{
    IndexId, IndexMethod, MaterializedView, SchedulerBinding, ViewId, ViewIndex,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn view(table_name: &str, query: &str) -> MaterializedView {
    MaterializedView {
        id: ViewId::generate(),
        title: "orders rollup".to_string(),
        table_name: table_name.to_string(),
        query_definition: query.to_string(),
        binding: SchedulerBinding::new(Duration::from_secs(300)),
        indexes: vec![],
        created_by: None,
        created_at: Timestamp::UNIX_EPOCH,
        last_run_at: None,
    }
}

fn index(view: &MaterializedView, column: &str, method: IndexMethod, unique: bool) -> ViewIndex {
    ViewIndex {
        id: IndexId::generate(),
        title: format!("by {column}"),
        view: view.id,
        method,
        column: column.to_string(),
        unique,
        created_by: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn serialize(stmt: &Statement) -> String {
    Serializer::postgresql().serialize(stmt)
}

// ---------------------------------------------------------------------------
// Materialized view statements
// ---------------------------------------------------------------------------

#[test]
fn create_materialized_view() {
    let v = view("t1", "SELECT * FROM src");
    assert_eq!(
        serialize(&Statement::create_materialized_view(&v)),
        "CREATE MATERIALIZED VIEW IF NOT EXISTS t1 AS SELECT * FROM src;"
    );
}

#[test]
fn refresh_is_always_concurrent() {
    let v = view("t1", "SELECT * FROM src");
    assert_eq!(
        serialize(&Statement::refresh_materialized_view(&v)),
        "REFRESH MATERIALIZED VIEW CONCURRENTLY t1;"
    );
}

#[test]
fn drop_materialized_view_is_guarded() {
    let v = view("t1", "SELECT * FROM src");
    assert_eq!(
        serialize(&Statement::drop_materialized_view(&v)),
        "DROP MATERIALIZED VIEW IF EXISTS t1;"
    );
}

// ---------------------------------------------------------------------------
// Index statements
// ---------------------------------------------------------------------------

#[test]
fn create_unique_btree_index() {
    let v = view("t1", "SELECT * FROM src");
    let idx = index(&v, "id", IndexMethod::BTree, true);
    assert_eq!(
        serialize(&Statement::create_index(&idx, &v.table_name)),
        "CREATE UNIQUE INDEX IF NOT EXISTS t1_id ON t1 USING btree(id);"
    );
}

#[test]
fn create_non_unique_gin_index() {
    let v = view("docs_mv", "SELECT id, body FROM docs");
    let idx = index(&v, "body", IndexMethod::Gin, false);
    assert_eq!(
        serialize(&Statement::create_index(&idx, &v.table_name)),
        "CREATE INDEX IF NOT EXISTS docs_mv_body ON docs_mv USING gin(body);"
    );
}

#[test]
fn drop_index_has_no_if_exists_guard() {
    let v = view("t1", "SELECT * FROM src");
    let idx = index(&v, "id", IndexMethod::BTree, true);
    assert_eq!(
        serialize(&Statement::drop_index(&idx, &v.table_name)),
        "DROP INDEX t1_id;"
    );
}
