use matview::{driver::Driver, schema::IndexMethod, task, Db, IndexDef, ViewDef};
use matview_driver_memory::{FaultPoint, Memory};

use matview_core::err;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn db() -> (Db, Arc<Memory>) {
    let driver = Arc::new(Memory::new());
    (Db::new(driver.clone() as Arc<dyn Driver>), driver)
}

fn orders() -> ViewDef {
    ViewDef {
        title: "orders rollup".to_string(),
        table_name: "t1".to_string(),
        query_definition: "SELECT * FROM src".to_string(),
        interval: Duration::from_secs(300),
        created_by: Some("ops".to_string()),
    }
}

fn unique_id_index() -> IndexDef {
    IndexDef {
        title: "by id".to_string(),
        column: "id".to_string(),
        method: IndexMethod::BTree,
        unique: true,
        created_by: None,
    }
}

// ---------------------------------------------------------------------------
// Saving and linking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_links_binding_disabled() {
    let (db, driver) = db();

    let view = db.save_view(orders()).await.unwrap();

    assert!(!view.binding.enabled);
    assert_eq!(
        view.binding.action.as_deref(),
        Some(task::REFRESH_MATERIALIZED_VIEW)
    );
    assert_eq!(task::view_id_from_args(&view.binding.args).unwrap(), view.id);

    // The persisted row agrees with the in-memory descriptor
    let stored = driver.stored_binding(view.binding.id).unwrap();
    assert!(!stored.enabled);
    assert_eq!(stored.action, view.binding.action);
    assert_eq!(stored.args, view.binding.args);
}

#[tokio::test]
async fn relink_is_a_no_op() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();

    // Any further binding write would trip this fault; a correctly linked
    // binding must not be re-written.
    driver.inject_fault(FaultPoint::UpdateBinding, err!("unexpected write"));
    db.link_scheduler_binding(&mut view).await.unwrap();
}

// ---------------------------------------------------------------------------
// create()
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_materializes_table_indexes_and_schedule() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();
    db.add_index(&mut view, unique_id_index()).await.unwrap();

    db.create(&mut view).await.unwrap();

    assert!(driver.table_exists("t1"));
    let index = driver.physical_index("t1", "t1_id").unwrap();
    assert!(index.unique);
    assert_eq!(index.method, IndexMethod::BTree);
    assert_eq!(index.column, "id");

    assert!(view.binding.enabled);
    assert!(driver.stored_binding(view.binding.id).unwrap().enabled);
}

#[tokio::test]
async fn create_twice_is_idempotent() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();
    db.add_index(&mut view, unique_id_index()).await.unwrap();

    db.create(&mut view).await.unwrap();
    db.create(&mut view).await.unwrap();

    assert!(driver.table_exists("t1"));
    assert!(driver.index_exists("t1", "t1_id"));
    assert!(driver.stored_binding(view.binding.id).unwrap().enabled);
}

// ---------------------------------------------------------------------------
// drop()
// ---------------------------------------------------------------------------

#[tokio::test]
async fn drop_removes_table_and_disables_schedule() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();
    db.add_index(&mut view, unique_id_index()).await.unwrap();
    db.create(&mut view).await.unwrap();

    db.drop(&mut view).await.unwrap();

    assert!(!driver.table_exists("t1"));
    assert!(!view.binding.enabled);
    assert!(!driver.stored_binding(view.binding.id).unwrap().enabled);

    // Index metadata rows deliberately survive a drop
    assert_eq!(driver.index_row_count(view.id), 1);
}

#[tokio::test]
async fn drop_is_idempotent() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();
    db.create(&mut view).await.unwrap();

    db.drop(&mut view).await.unwrap();
    db.drop(&mut view).await.unwrap();

    assert!(!driver.table_exists("t1"));
}

// ---------------------------------------------------------------------------
// enable / disable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggles_skip_redundant_writes() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();

    // Already disabled: no write may happen
    driver.inject_fault(FaultPoint::UpdateBinding, err!("unexpected write"));
    db.disable_periodic_refresh(&mut view).await.unwrap();

    // Enabling flips the flag; the injected fault fires now
    let err = db.enable_periodic_refresh(&mut view).await.unwrap_err();
    assert_eq!(err.to_string(), "unexpected write");
    assert!(!view.binding.enabled);

    db.enable_periodic_refresh(&mut view).await.unwrap();
    assert!(view.binding.enabled);
    assert!(driver.stored_binding(view.binding.id).unwrap().enabled);
}

// ---------------------------------------------------------------------------
// delete()
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_all_three_resources() {
    let (db, driver) = db();

    let mut view = db.save_view(orders()).await.unwrap();
    db.add_index(&mut view, unique_id_index()).await.unwrap();
    db.create(&mut view).await.unwrap();

    let id = view.id;
    let binding_id = view.binding.id;
    db.delete(view).await.unwrap();

    assert!(!driver.table_exists("t1"));
    assert!(!driver.view_row_exists(id));
    assert!(driver.stored_binding(binding_id).is_none());

    // Index rows cascade with the view row
    assert_eq!(driver.index_row_count(id), 0);

    let err = db.get_view(id).await.unwrap_err();
    assert!(err.is_not_found());
}
