use super::events::{EventSink, WorkflowEvent};
use crate::model::{CreateNotificationOptions, NotificationKind};
use crate::store::Store;
use async_trait::async_trait;
use std::sync::Arc;

/// Turns workflow events into notification rows.
pub struct NotificationSink {
    store: Arc<Store>,
    supervisor_recipient: String,
}

impl NotificationSink {
    #[must_use]
    pub fn new(store: Arc<Store>, supervisor_recipient: impl Into<String>) -> Self {
        Self {
            store,
            supervisor_recipient: supervisor_recipient.into(),
        }
    }

    fn notifications_for(&self, event: &WorkflowEvent) -> Vec<CreateNotificationOptions> {
        match event {
            WorkflowEvent::TicketCreated {
                ticket_id,
                ticket_number,
                client_name,
            } => vec![CreateNotificationOptions {
                user_id: self.supervisor_recipient.clone(),
                title: "Nuevo ticket de soporte".to_string(),
                message: format!("Nuevo ticket {ticket_number} creado por {client_name}"),
                kind: NotificationKind::Info,
                work_order_id: None,
                ticket_id: Some(ticket_id.clone()),
            }],
            WorkflowEvent::TicketAssigned {
                ticket_id,
                ticket_number,
                technician_id,
            } => vec![CreateNotificationOptions {
                user_id: technician_id.clone(),
                title: "Ticket asignado".to_string(),
                message: format!("Se te asignó el ticket {ticket_number}"),
                kind: NotificationKind::Info,
                work_order_id: None,
                ticket_id: Some(ticket_id.clone()),
            }],
            WorkflowEvent::WorkOrderCreated {
                work_order_id,
                number,
                ticket_id,
                ticket_number,
                technician_ids,
            } => technician_ids
                .iter()
                .map(|technician| CreateNotificationOptions {
                    user_id: technician.clone(),
                    title: "Nueva orden de trabajo".to_string(),
                    message: format!("Orden {number} creada desde el ticket {ticket_number}"),
                    kind: NotificationKind::Info,
                    work_order_id: Some(work_order_id.clone()),
                    ticket_id: Some(ticket_id.clone()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl EventSink for NotificationSink {
    fn name(&self) -> &str {
        "notifications"
    }

    async fn deliver(&self, event: &WorkflowEvent) -> anyhow::Result<()> {
        for options in self.notifications_for(event) {
            self.store.create_notification(options).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
