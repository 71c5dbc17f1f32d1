#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, open_store, ticket, work_order};
use fieldops_daemon::store::{Store, StoreOptions};
use std::sync::Arc;

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp_dir = create_test_dir();
    let (order_id, ticket_id) = {
        let store = open_store(temp_dir.path()).await;
        let order = store.create_work_order(work_order("Acme")).await.unwrap();
        let ticket = store.create_ticket(ticket("Acme", "support")).await.unwrap();
        store.flush().await.unwrap();
        (order.id, ticket.id)
    };

    let store = open_store(temp_dir.path()).await;
    assert_eq!(store.get_work_order(&order_id).await.unwrap().number, "OT-00001");
    assert_eq!(
        store.get_ticket(&ticket_id).await.unwrap().ticket_number,
        "TIC-00001"
    );
    assert_eq!(store.list_templates().await.len(), 8);
}

#[tokio::test]
async fn test_numbers_are_not_reused_across_reopen() {
    let temp_dir = create_test_dir();
    {
        let store = open_store(temp_dir.path()).await;
        store.create_work_order(work_order("Acme")).await.unwrap();
        let second = store.create_work_order(work_order("Globex")).await.unwrap();
        assert!(store.delete_work_order(&second.id).await);
    }

    let store = open_store(temp_dir.path()).await;
    let next = store.create_work_order(work_order("Initech")).await.unwrap();
    assert_eq!(next.number, "OT-00003");
}

#[tokio::test]
async fn test_legacy_array_snapshot_is_loaded() {
    let temp_dir = create_test_dir();
    let legacy = serde_json::json!([{
        "id": "legacy-1",
        "ticketNumber": "TIC-00004",
        "clientName": "Acme",
        "clientEmail": "acme@example.com",
        "subject": "Impresora",
        "description": "Atasco de papel",
        "category": "support",
        "priority": "medium",
        "status": "open",
        "clientVisible": true,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-01T09:00:00Z"
    }]);
    std::fs::write(
        temp_dir.path().join("support_tickets.json"),
        serde_json::to_string(&legacy).unwrap(),
    )
    .unwrap();

    let store = open_store(temp_dir.path()).await;
    assert_eq!(store.list_tickets().await.len(), 1);
    let next = store.create_ticket(ticket("Globex", "support")).await.unwrap();
    assert_eq!(next.ticket_number, "TIC-00005");
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_numbers() {
    let temp_dir = create_test_dir();
    let store = Arc::new(
        Store::open(StoreOptions::new(temp_dir.path()).unwrap())
            .await
            .unwrap(),
    );

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create_work_order(work_order(&format!("Cliente {i}")))
                    .await
                    .unwrap()
                    .number
            })
        })
        .collect();

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 20);
    assert_eq!(numbers[0], "OT-00001");
    assert_eq!(numbers[19], "OT-00020");
}
