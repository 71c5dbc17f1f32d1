use super::*;
use crate::model::WorkOrderStatus;
use crate::test_fixtures::{open_store, ticket_draft};
use chrono::Duration;

async fn workflow() -> (tempfile::TempDir, TicketWorkflow) {
    let (temp, store) = open_store().await;
    (temp, TicketWorkflow::new(Arc::new(store), WorkflowSettings::default()))
}

fn convert_options(technicians: &[&str]) -> ConvertTicketOptions {
    ConvertTicketOptions {
        technician_ids: technicians.iter().map(ToString::to_string).collect(),
        scheduled_date: Utc::now() + Duration::days(2),
        notes: Some("Llevar repuestos".to_string()),
        supervisor_id: None,
    }
}

#[tokio::test]
async fn test_create_ticket_notifies_supervisor() {
    let (_temp, workflow) = workflow().await;
    let result = workflow
        .create_ticket(ticket_draft("Acme", "support"))
        .await
        .unwrap();

    assert_eq!(result.ticket_number, "TIC-00001");
    assert_eq!(result.ticket.status, TicketStatus::Open);
    assert_eq!(result.events.len(), 1);

    let notes = workflow.store().notifications_for("2").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Nuevo ticket TIC-00001 creado por Acme");
}

#[tokio::test]
async fn test_create_ticket_failure_emits_nothing() {
    let (_temp, workflow) = workflow().await;
    let mut draft = ticket_draft("Acme", "support");
    draft.subject.clear();
    assert!(workflow.create_ticket(draft).await.is_err());
    assert!(workflow.store().notifications_for("2").await.is_empty());
}

#[tokio::test]
async fn test_assign_to_technician() {
    let (_temp, workflow) = workflow().await;
    let created = workflow
        .create_ticket(ticket_draft("Acme", "support"))
        .await
        .unwrap();
    let assigned = workflow
        .assign_to_technician(&created.ticket.id, "3")
        .await
        .unwrap();
    assert_eq!(assigned.ticket.status, TicketStatus::Assigned);
    assert_eq!(assigned.ticket.assigned_to.as_deref(), Some("3"));
    assert_eq!(workflow.store().unread_count("3").await, 1);
}

#[tokio::test]
async fn test_convert_installation_ticket() {
    let (_temp, workflow) = workflow().await;
    let created = workflow
        .create_ticket(ticket_draft("Acme", "installation"))
        .await
        .unwrap();
    let options = convert_options(&["3", "4"]);
    let scheduled = options.scheduled_date;
    let result = workflow
        .convert_to_work_order(&created.ticket.id, options)
        .await
        .unwrap();

    let order = &result.work_order;
    assert_eq!(order.number, "OT-00001");
    assert_eq!(order.service_type, "Instalación");
    assert_eq!(order.status, WorkOrderStatus::Assigned);
    assert_eq!(order.scheduled_date, scheduled);
    assert_eq!(order.assigned_formats, vec!["orden-trabajo"]);
    assert_eq!(order.notes.as_deref(), Some("Llevar repuestos"));
    assert_eq!(result.ticket.status, TicketStatus::Assigned);
    assert!(result.ticket.assigned_to.is_none());

    for technician in ["3", "4"] {
        let notes = workflow.store().notifications_for(technician).await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].work_order_id.as_deref(), Some(order.id.as_str()));
    }
}

#[tokio::test]
async fn test_convert_unknown_ticket_is_not_found() {
    let (_temp, workflow) = workflow().await;
    let result = workflow
        .convert_to_work_order("missing", convert_options(&["3"]))
        .await;
    assert!(result.unwrap_err().is_not_found());
    assert!(workflow.store().list_work_orders().await.is_empty());
    assert!(workflow.store().notifications_for("3").await.is_empty());
}

#[tokio::test]
async fn test_convert_twice_after_progress_fails() {
    let (_temp, workflow) = workflow().await;
    let created = workflow
        .create_ticket(ticket_draft("Acme", "support"))
        .await
        .unwrap();
    let id = created.ticket.id;
    workflow.assign_to_technician(&id, "3").await.unwrap();
    workflow
        .transition_ticket(&id, TicketStatus::InProgress, None)
        .await
        .unwrap();
    let result = workflow.convert_to_work_order(&id, convert_options(&["3"])).await;
    assert!(matches!(result, Err(StoreError::InvalidTransition { .. })));
    assert!(workflow.store().list_work_orders().await.is_empty());
}

#[tokio::test]
async fn test_transition_records_resolution() {
    let (_temp, workflow) = workflow().await;
    let created = workflow
        .create_ticket(ticket_draft("Acme", "support"))
        .await
        .unwrap();
    let id = created.ticket.id;
    workflow.assign_to_technician(&id, "3").await.unwrap();
    workflow
        .transition_ticket(&id, TicketStatus::InProgress, None)
        .await
        .unwrap();
    let resolved = workflow
        .transition_ticket(&id, TicketStatus::Resolved, Some("Reinicio de fuente".to_string()))
        .await
        .unwrap();
    assert_eq!(resolved.status, TicketStatus::Resolved);
    assert_eq!(resolved.resolution_notes.as_deref(), Some("Reinicio de fuente"));
}

#[tokio::test]
async fn test_custom_settings_route_notifications() {
    let (_temp, store) = open_store().await;
    let settings = WorkflowSettings {
        supervisor_recipient: "7".to_string(),
        acting_supervisor: "8".to_string(),
        default_work_order_format: "visita-tecnica-diagnostico".to_string(),
    };
    let workflow = TicketWorkflow::new(Arc::new(store), settings);
    let created = workflow
        .create_ticket(ticket_draft("Acme", "support"))
        .await
        .unwrap();
    let result = workflow
        .convert_to_work_order(&created.ticket.id, convert_options(&["3"]))
        .await
        .unwrap();
    assert_eq!(workflow.store().unread_count("7").await, 1);
    assert_eq!(result.work_order.created_by, "8");
    assert_eq!(
        result.work_order.assigned_formats,
        vec!["visita-tecnica-diagnostico"]
    );
}
