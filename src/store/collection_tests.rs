use super::*;
use crate::test_fixtures::work_order_record;

#[test]
fn test_next_number_starts_at_one() {
    let orders: Collection<WorkOrder> = Collection::new();
    assert_eq!(orders.next_number(), "OT-00001");
}

#[test]
fn test_push_advances_sequence() {
    let mut orders = Collection::new();
    orders.push(work_order_record("OT-00001"));
    orders.push(work_order_record("OT-00002"));
    assert_eq!(orders.sequence(), 2);
    assert_eq!(orders.next_number(), "OT-00003");
}

#[test]
fn test_numbers_not_reused_after_remove() {
    let mut orders = Collection::new();
    let first = work_order_record("OT-00001");
    let first_id = first.id.clone();
    orders.push(first);
    orders.push(work_order_record("OT-00002"));

    assert!(orders.remove(&first_id).is_some());
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.next_number(), "OT-00003");
}

#[test]
fn test_from_parts_recovers_sequence_from_numbers() {
    let items = vec![work_order_record("OT-00004"), work_order_record("OT-00009")];
    let orders = Collection::from_parts(items, 0);
    assert_eq!(orders.sequence(), 9);
    assert_eq!(orders.next_number(), "OT-00010");
}

#[test]
fn test_from_parts_keeps_larger_stored_sequence() {
    let orders = Collection::from_parts(vec![work_order_record("OT-00002")], 7);
    assert_eq!(orders.sequence(), 7);
}

#[test]
fn test_unnumbered_records_leave_sequence_alone() {
    let forms: Collection<FilledForm> = Collection::from_parts(Vec::new(), 0);
    assert_eq!(forms.sequence(), 0);
    assert!(forms.is_empty());
}

#[test]
fn test_ticket_numbers_use_their_own_prefix() {
    let tickets: Collection<SupportTicket> = Collection::from_parts(Vec::new(), 4);
    assert_eq!(tickets.next_number(), "TIC-00005");
}

#[test]
fn test_query_preserves_insertion_order() {
    let mut orders = Collection::new();
    for n in ["OT-00001", "OT-00002", "OT-00003"] {
        orders.push(work_order_record(n));
    }
    let numbers: Vec<String> = orders.query(|_| true).into_iter().map(|o| o.number).collect();
    assert_eq!(numbers, vec!["OT-00001", "OT-00002", "OT-00003"]);
}

#[test]
fn test_replace_swaps_existing_record() {
    let mut orders = Collection::new();
    let order = work_order_record("OT-00001");
    orders.push(order.clone());

    let mut changed = order.clone();
    changed.client_name = "Globex".to_string();
    let previous = orders.replace(changed).expect("existing record");
    assert_eq!(previous.client_name, "Acme");
    assert_eq!(orders.get(&order.id).map(|o| o.client_name.as_str()), Some("Globex"));
}

#[test]
fn test_replace_unknown_record_is_none() {
    let mut orders = Collection::new();
    assert!(orders.replace(work_order_record("OT-00001")).is_none());
    assert!(orders.is_empty());
}
