#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, open_store, work_order};
use fieldops_daemon::model::{UpdateWorkOrderOptions, WorkOrderStatus};
use fieldops_daemon::store::StoreError;

#[tokio::test]
async fn test_three_creates_number_in_order() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;

    let a = store.create_work_order(work_order("Acme")).await.unwrap();
    let b = store.create_work_order(work_order("Globex")).await.unwrap();
    let c = store.create_work_order(work_order("Initech")).await.unwrap();

    assert_eq!(
        [a.number, b.number, c.number],
        ["OT-00001", "OT-00002", "OT-00003"]
    );
    let listed: Vec<String> = store
        .list_work_orders()
        .await
        .into_iter()
        .map(|o| o.client_name)
        .collect();
    assert_eq!(listed, vec!["Acme", "Globex", "Initech"]);
}

#[tokio::test]
async fn test_updated_at_strictly_increases() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;
    let order = store.create_work_order(work_order("Acme")).await.unwrap();

    let mut last = order.updated_at;
    for status in [
        WorkOrderStatus::Assigned,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
    ] {
        let updated = store
            .update_work_order(
                &order.id,
                UpdateWorkOrderOptions {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
            .expect("Should update work order");
        assert!(updated.updated_at > last, "updatedAt must move forward");
        assert_eq!(updated.created_at, order.created_at);
        last = updated.updated_at;
    }
}

#[tokio::test]
async fn test_query_leaves_store_unchanged() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;
    store.create_work_order(work_order("Acme")).await.unwrap();
    let snapshot_before = std::fs::read_to_string(temp_dir.path().join("work_orders.json")).unwrap();

    let pending = store
        .query_work_orders(|o| o.status == WorkOrderStatus::Pending)
        .await;
    assert_eq!(pending.len(), 1);

    let snapshot_after = std::fs::read_to_string(temp_dir.path().join("work_orders.json")).unwrap();
    assert_eq!(snapshot_before, snapshot_after);
}

#[tokio::test]
async fn test_update_missing_order_is_not_found() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;
    let result = store
        .update_work_order("does-not-exist", UpdateWorkOrderOptions::default())
        .await;
    assert!(matches!(result, Err(StoreError::NotFound(..))));
}
