use matview_driver_memory::Memory;

use matview_core::{
    driver::operation::Transaction,
    schema::{MaterializedView, SchedulerBinding, ViewId},
    stmt::Statement,
    Driver,
};

use jiff::Timestamp;
use std::time::Duration;

fn orders_view() -> MaterializedView {
    MaterializedView {
        id: ViewId::generate(),
        title: "orders".to_string(),
        table_name: "orders_mv".to_string(),
        query_definition: "SELECT * FROM orders".to_string(),
        binding: SchedulerBinding::new(Duration::from_secs(60)),
        indexes: vec![],
        created_by: None,
        created_at: Timestamp::UNIX_EPOCH,
        last_run_at: None,
    }
}

async fn exec(driver: &Memory, op: impl Into<matview_core::driver::Operation>) {
    driver.exec(op.into()).await.unwrap();
}

#[tokio::test]
async fn commit_keeps_ddl_effects() {
    let driver = Memory::new();
    let view = orders_view();

    exec(&driver, Transaction::Start).await;
    exec(&driver, Statement::create_materialized_view(&view)).await;
    exec(&driver, Transaction::Commit).await;

    assert!(driver.table_exists("orders_mv"));
}

#[tokio::test]
async fn rollback_restores_ddl_effects() {
    let driver = Memory::new();
    let view = orders_view();

    exec(&driver, Transaction::Start).await;
    exec(&driver, Statement::create_materialized_view(&view)).await;
    exec(&driver, Transaction::Rollback).await;

    assert!(!driver.table_exists("orders_mv"));
}

#[tokio::test]
async fn rollback_restores_record_rows() {
    let driver = Memory::new();
    let view = orders_view();

    exec(&driver, Transaction::Start).await;
    exec(
        &driver,
        matview_core::driver::operation::InsertBinding {
            binding: view.binding.clone(),
        },
    )
    .await;
    exec(
        &driver,
        matview_core::driver::operation::InsertView { view: view.clone() },
    )
    .await;
    exec(&driver, Transaction::Rollback).await;

    assert_eq!(driver.view_row_count(), 0);
    assert_eq!(driver.binding_row_count(), 0);
}

#[tokio::test]
async fn nested_transactions_are_rejected() {
    let driver = Memory::new();

    exec(&driver, Transaction::Start).await;
    let err = driver
        .exec(Transaction::Start.into())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "nested transactions are not supported");
}

#[tokio::test]
async fn unbalanced_commit_is_rejected() {
    let driver = Memory::new();

    let err = driver.exec(Transaction::Commit.into()).await.unwrap_err();
    assert_eq!(err.to_string(), "COMMIT without an open transaction");
}
