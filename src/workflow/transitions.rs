use super::engine::{ConvertTicketOptions, WorkflowSettings};
use crate::model::{
    service_type_for_category, CreateWorkOrderOptions, SupportTicket, TicketStatus,
    WorkOrderStatus,
};
use crate::store::StoreError;

/// Placeholder address for converted orders whose client gave no company.
pub const ADDRESS_PLACEHOLDER: &str = "Por definir";

fn check(from: TicketStatus, to: TicketStatus) -> Result<(), StoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(StoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Hand the ticket to a technician.
pub fn assign(ticket: &mut SupportTicket, technician_id: &str) -> Result<(), StoreError> {
    if technician_id.trim().is_empty() {
        return Err(StoreError::Validation("technicianId is required".to_string()));
    }
    check(ticket.status, TicketStatus::Assigned)?;
    ticket.assigned_to = Some(technician_id.to_string());
    ticket.status = TicketStatus::Assigned;
    Ok(())
}

/// Move the ticket one step along its lifecycle. Resolution notes are
/// recorded only when resolving.
pub fn advance(
    ticket: &mut SupportTicket,
    next: TicketStatus,
    resolution_notes: Option<String>,
) -> Result<(), StoreError> {
    check(ticket.status, next)?;
    ticket.status = next;
    if next == TicketStatus::Resolved {
        if let Some(notes) = resolution_notes {
            ticket.resolution_notes = Some(notes);
        }
    }
    Ok(())
}

/// Mark the ticket assigned and build the work-order draft that replaces it.
pub fn plan_conversion(
    ticket: &mut SupportTicket,
    request: &ConvertTicketOptions,
    settings: &WorkflowSettings,
) -> Result<CreateWorkOrderOptions, StoreError> {
    if request.technician_ids.iter().all(|t| t.trim().is_empty()) {
        return Err(StoreError::Validation(
            "at least one technician is required".to_string(),
        ));
    }
    check(ticket.status, TicketStatus::Assigned)?;

    let supervisor = request
        .supervisor_id
        .clone()
        .unwrap_or_else(|| settings.acting_supervisor.clone());
    let draft = CreateWorkOrderOptions {
        client_name: ticket.client_name.clone(),
        client_contact: ticket.contact_line(),
        client_address: ticket
            .client_company
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| ADDRESS_PLACEHOLDER.to_string()),
        description: format!("{}\n\nDescripción: {}", ticket.subject, ticket.description),
        service_type: service_type_for_category(&ticket.category).to_string(),
        priority: ticket.priority,
        status: WorkOrderStatus::Assigned,
        assigned_technicians: request
            .technician_ids
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect(),
        assigned_formats: vec![settings.default_work_order_format.clone()],
        created_by: supervisor.clone(),
        supervisor_id: Some(supervisor),
        scheduled_date: Some(request.scheduled_date),
        notes: request.notes.clone(),
    };
    ticket.status = TicketStatus::Assigned;
    Ok(draft)
}

#[cfg(test)]
#[path = "transitions_tests.rs"]
mod tests;
