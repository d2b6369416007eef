use matview::{driver::Driver, schema::IndexMethod, Db, IndexDef, ViewDef};
use matview_driver_memory::{FaultPoint, Memory};

use matview_core::{err, Error};
use std::sync::Arc;
use std::time::Duration;

fn db() -> (Db, Arc<Memory>) {
    let driver = Arc::new(Memory::new());
    (Db::new(driver.clone() as Arc<dyn Driver>), driver)
}

fn events() -> ViewDef {
    ViewDef {
        title: "events rollup".to_string(),
        table_name: "events_mv".to_string(),
        query_definition: "SELECT * FROM events".to_string(),
        interval: Duration::from_secs(60),
        created_by: None,
    }
}

fn index(column: &str, unique: bool) -> IndexDef {
    IndexDef {
        title: format!("by {column}"),
        column: column.to_string(),
        method: IndexMethod::BTree,
        unique,
        created_by: None,
    }
}

// ---------------------------------------------------------------------------
// create() is all-or-nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_index_creation_rolls_back_the_table() {
    let (db, driver) = db();

    let mut view = db.save_view(events()).await.unwrap();
    db.add_index(&mut view, index("id", true)).await.unwrap();
    db.add_index(&mut view, index("kind", false)).await.unwrap();

    // create() issues three DDL statements: the table, then each index in
    // order. Fail the second index.
    driver.inject_fault(
        FaultPoint::Ddl { nth: 3 },
        Error::definition("column \"kind\" does not exist"),
    );

    let err = db.create(&mut view).await.unwrap_err();
    assert!(err.is_definition());

    // Step 1's table and step 2's index are rolled back with it
    assert!(!driver.table_exists("events_mv"));
    assert!(!driver.index_exists("events_mv", "events_mv_id"));
    assert!(!view.binding.enabled);
    assert!(!driver.stored_binding(view.binding.id).unwrap().enabled);
}

#[tokio::test]
async fn failed_enable_write_rolls_back_the_ddl() {
    let (db, driver) = db();

    let mut view = db.save_view(events()).await.unwrap();
    db.add_index(&mut view, index("id", true)).await.unwrap();

    driver.inject_fault(FaultPoint::UpdateBinding, err!("binding store unavailable"));

    db.create(&mut view).await.unwrap_err();

    assert!(!driver.table_exists("events_mv"));
    assert!(!view.binding.enabled);
}

#[tokio::test]
async fn invalid_query_definition_creates_nothing() {
    let (db, driver) = db();

    let mut view = db.save_view(events()).await.unwrap();

    driver.inject_fault(
        FaultPoint::Ddl { nth: 1 },
        Error::definition("syntax error at or near \"SELEC\""),
    );

    let err = db.create(&mut view).await.unwrap_err();
    assert!(err.is_definition());
    assert!(!driver.table_exists("events_mv"));
    assert!(!view.binding.enabled);
}

// ---------------------------------------------------------------------------
// save_view() is all-or-nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_view_insert_rolls_back_the_binding() {
    let (db, driver) = db();

    driver.inject_fault(FaultPoint::InsertView, err!("view store unavailable"));

    db.save_view(events()).await.unwrap_err();

    assert_eq!(driver.view_row_count(), 0);
    assert_eq!(driver.binding_row_count(), 0);
}

// ---------------------------------------------------------------------------
// delete() is all-or-nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_binding_deletion_rolls_back_everything() {
    let (db, driver) = db();

    let mut view = db.save_view(events()).await.unwrap();
    db.add_index(&mut view, index("id", true)).await.unwrap();
    db.create(&mut view).await.unwrap();

    driver.inject_fault(FaultPoint::DeleteBinding, err!("binding store unavailable"));

    let id = view.id;
    let binding_id = view.binding.id;
    db.delete(view).await.unwrap_err();

    // Transactional DDL: even the already-executed drop rolls back
    assert!(driver.table_exists("events_mv"));
    assert!(driver.view_row_exists(id));
    assert!(driver.stored_binding(binding_id).unwrap().enabled);
    assert_eq!(driver.index_row_count(id), 1);
}

#[tokio::test]
async fn failed_view_row_deletion_rolls_back_everything() {
    let (db, driver) = db();

    let mut view = db.save_view(events()).await.unwrap();
    db.create(&mut view).await.unwrap();

    driver.inject_fault(FaultPoint::DeleteView, err!("view store unavailable"));

    let id = view.id;
    let binding_id = view.binding.id;
    db.delete(view).await.unwrap_err();

    assert!(driver.table_exists("events_mv"));
    assert!(driver.view_row_exists(id));
    assert!(driver.stored_binding(binding_id).is_some());
}
