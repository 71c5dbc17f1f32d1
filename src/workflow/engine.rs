use super::events::{EventDispatcher, WorkflowEvent};
use super::notify::NotificationSink;
use super::transitions;
use crate::model::{CreateTicketOptions, SupportTicket, TicketStatus, WorkOrder};
use crate::store::{Store, StoreError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Who the workflow acts for and notifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Receives the new-ticket notification
    pub supervisor_recipient: String,
    /// Creator and supervisor of converted work orders
    pub acting_supervisor: String,
    /// Template slug assigned to converted work orders
    pub default_work_order_format: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            supervisor_recipient: "2".to_string(),
            acting_supervisor: "2".to_string(),
            default_work_order_format: "orden-trabajo".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertTicketOptions {
    pub technician_ids: Vec<String>,
    pub scheduled_date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Overrides the configured acting supervisor
    pub supervisor_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateTicketResult {
    /// The externally meaningful handle, "TIC-00001"
    pub ticket_number: String,
    pub ticket: SupportTicket,
    pub events: Vec<WorkflowEvent>,
}

#[derive(Debug, Clone)]
pub struct AssignTicketResult {
    pub ticket: SupportTicket,
    pub events: Vec<WorkflowEvent>,
}

#[derive(Debug, Clone)]
pub struct ConvertTicketResult {
    pub work_order: WorkOrder,
    pub ticket: SupportTicket,
    pub events: Vec<WorkflowEvent>,
}

pub struct TicketWorkflow {
    store: Arc<Store>,
    dispatcher: EventDispatcher,
    settings: WorkflowSettings,
}

impl TicketWorkflow {
    /// Workflow that records its events as notifications in `store`.
    #[must_use]
    pub fn new(store: Arc<Store>, settings: WorkflowSettings) -> Self {
        let sink = NotificationSink::new(Arc::clone(&store), settings.supervisor_recipient.clone());
        let dispatcher = EventDispatcher::new().with_sink(Arc::new(sink));
        Self::with_dispatcher(store, settings, dispatcher)
    }

    #[must_use]
    pub fn with_dispatcher(
        store: Arc<Store>,
        settings: WorkflowSettings,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            store,
            dispatcher,
            settings,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    #[must_use]
    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// Open a ticket and announce it to the supervisor recipient.
    pub async fn create_ticket(
        &self,
        options: CreateTicketOptions,
    ) -> Result<CreateTicketResult, StoreError> {
        let ticket = self.store.create_ticket(options).await?;
        let events = vec![WorkflowEvent::TicketCreated {
            ticket_id: ticket.id.clone(),
            ticket_number: ticket.ticket_number.clone(),
            client_name: ticket.client_name.clone(),
        }];
        self.dispatcher.dispatch(&events).await;
        Ok(CreateTicketResult {
            ticket_number: ticket.ticket_number.clone(),
            ticket,
            events,
        })
    }

    pub async fn assign_to_technician(
        &self,
        ticket_id: &str,
        technician_id: &str,
    ) -> Result<AssignTicketResult, StoreError> {
        let (ticket, ()) = self
            .store
            .modify_ticket(ticket_id, |ticket| transitions::assign(ticket, technician_id))
            .await?;
        info!("Assigned ticket {} to {technician_id}", ticket.ticket_number);
        let events = vec![WorkflowEvent::TicketAssigned {
            ticket_id: ticket.id.clone(),
            ticket_number: ticket.ticket_number.clone(),
            technician_id: technician_id.to_string(),
        }];
        self.dispatcher.dispatch(&events).await;
        Ok(AssignTicketResult { ticket, events })
    }

    /// Replace a ticket with a scheduled work order.
    ///
    /// The order is created and the ticket marked assigned atomically; an
    /// unknown ticket id is reported as `NotFound`.
    pub async fn convert_to_work_order(
        &self,
        ticket_id: &str,
        options: ConvertTicketOptions,
    ) -> Result<ConvertTicketResult, StoreError> {
        let settings = &self.settings;
        let (ticket, work_order) = self
            .store
            .convert_ticket(ticket_id, |ticket| {
                transitions::plan_conversion(ticket, &options, settings)
            })
            .await?;
        let events = vec![WorkflowEvent::WorkOrderCreated {
            work_order_id: work_order.id.clone(),
            number: work_order.number.clone(),
            ticket_id: ticket.id.clone(),
            ticket_number: ticket.ticket_number.clone(),
            technician_ids: work_order.assigned_technicians.clone(),
        }];
        self.dispatcher.dispatch(&events).await;
        Ok(ConvertTicketResult {
            work_order,
            ticket,
            events,
        })
    }

    /// Move a ticket along its lifecycle (in progress, resolved, closed).
    pub async fn transition_ticket(
        &self,
        ticket_id: &str,
        next: TicketStatus,
        resolution_notes: Option<String>,
    ) -> Result<SupportTicket, StoreError> {
        let (ticket, ()) = self
            .store
            .modify_ticket(ticket_id, |ticket| {
                transitions::advance(ticket, next, resolution_notes)
            })
            .await?;
        info!("Ticket {} is now {}", ticket.ticket_number, ticket.status);
        Ok(ticket)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
