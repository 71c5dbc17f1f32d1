use super::collection::Collection;
use super::work_orders::insert_work_order;
use super::{Problems, Store, StoreError};
use crate::model::{
    CreateTicketOptions, CreateWorkOrderOptions, EntityKind, SupportTicket, TicketStatus,
    UpdateTicketOptions, WorkOrder,
};
use crate::utils::{generate_id, next_timestamp, now};
use tracing::info;

fn validate_draft(options: &CreateTicketOptions) -> Result<(), StoreError> {
    let mut problems = Problems::new();
    problems.require("clientName", &options.client_name);
    problems.require("clientEmail", &options.client_email);
    problems.require("subject", &options.subject);
    problems.into_result()
}

/// A ticket edit may not rename the ticket it was given.
fn ensure_same_ticket(original: &SupportTicket, edited: &SupportTicket) -> Result<(), StoreError> {
    if edited.id == original.id && edited.ticket_number == original.ticket_number {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "ticket {} cannot change its id or number",
            original.ticket_number
        )))
    }
}

/// Swap the edited ticket in, refreshing `updated_at`.
fn commit_ticket(
    tickets: &mut Collection<SupportTicket>,
    mut ticket: SupportTicket,
) -> Result<SupportTicket, StoreError> {
    ticket.updated_at = next_timestamp(ticket.updated_at);
    tickets
        .replace(ticket.clone())
        .ok_or_else(|| StoreError::not_found(EntityKind::SupportTicket, &ticket.id))?;
    Ok(ticket)
}

impl Store {
    /// Insert a ticket as submitted by a client. New tickets are always open,
    /// visible to the client, and carry no attachments or internal notes.
    pub async fn create_ticket(
        &self,
        options: CreateTicketOptions,
    ) -> Result<SupportTicket, StoreError> {
        validate_draft(&options)?;
        let mut tickets = self.tickets.lock().await;
        let ticket_number = tickets.next_number();
        let created_at = now();
        let ticket = SupportTicket {
            id: generate_id(),
            ticket_number,
            client_name: options.client_name,
            client_email: options.client_email,
            client_phone: options.client_phone,
            client_company: options.client_company.filter(|c| !c.trim().is_empty()),
            subject: options.subject,
            description: options.description,
            category: options.category,
            priority: options.priority,
            status: TicketStatus::Open,
            assigned_to: None,
            attachments: Vec::new(),
            internal_notes: String::new(),
            resolution_notes: None,
            client_visible: true,
            created_at,
            updated_at: created_at,
        };
        tickets.push(ticket.clone());
        self.persist(&tickets).await;
        info!("Created ticket {} for {}", ticket.ticket_number, ticket.client_name);
        Ok(ticket)
    }

    /// Edit the non-status fields of a ticket.
    pub async fn update_ticket(
        &self,
        id: &str,
        options: UpdateTicketOptions,
    ) -> Result<SupportTicket, StoreError> {
        if let Some(subject) = &options.subject {
            let mut problems = Problems::new();
            problems.require("subject", subject);
            problems.into_result()?;
        }
        let (ticket, ()) = self
            .modify_ticket(id, |ticket| {
                if let Some(v) = options.subject {
                    ticket.subject = v;
                }
                if let Some(v) = options.description {
                    ticket.description = v;
                }
                if let Some(v) = options.category {
                    ticket.category = v;
                }
                if let Some(v) = options.priority {
                    ticket.priority = v;
                }
                if let Some(v) = options.client_company {
                    ticket.client_company = Some(v);
                }
                if let Some(v) = options.internal_notes {
                    ticket.internal_notes = v;
                }
                if let Some(v) = options.client_visible {
                    ticket.client_visible = v;
                }
                ticket.attachments.extend(options.add_attachments);
                Ok(())
            })
            .await?;
        Ok(ticket)
    }

    /// Apply `change` to a copy of the ticket and commit it only if the
    /// closure succeeds and leaves the id and number alone. `updated_at` is
    /// refreshed on commit.
    pub(crate) async fn modify_ticket<R>(
        &self,
        id: &str,
        change: impl FnOnce(&mut SupportTicket) -> Result<R, StoreError>,
    ) -> Result<(SupportTicket, R), StoreError> {
        let mut tickets = self.tickets.lock().await;
        let original = tickets
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::SupportTicket, id))?;
        let mut ticket = original.clone();
        let output = change(&mut ticket)?;
        ensure_same_ticket(&original, &ticket)?;
        let ticket = commit_ticket(&mut tickets, ticket)?;
        self.persist(&tickets).await;
        Ok((ticket, output))
    }

    /// Create a work order from a ticket and update the ticket, as one unit.
    ///
    /// Holds the ticket lock, then the work-order lock, for the whole
    /// operation. `plan` edits a copy of the ticket and returns the work-order
    /// draft; nothing is committed unless both the plan and the work-order
    /// insert succeed.
    pub(crate) async fn convert_ticket(
        &self,
        ticket_id: &str,
        plan: impl FnOnce(&mut SupportTicket) -> Result<CreateWorkOrderOptions, StoreError>,
    ) -> Result<(SupportTicket, WorkOrder), StoreError> {
        let mut tickets = self.tickets.lock().await;
        let mut orders = self.work_orders.lock().await;

        let original = tickets
            .get(ticket_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::SupportTicket, ticket_id))?;
        let mut ticket = original.clone();
        let draft = plan(&mut ticket)?;
        ensure_same_ticket(&original, &ticket)?;
        let order = insert_work_order(&mut orders, draft)?;
        let ticket = commit_ticket(&mut tickets, ticket)?;

        self.persist(&orders).await;
        self.persist(&tickets).await;
        info!(
            "Converted ticket {} into work order {}",
            ticket.ticket_number, order.number
        );
        Ok((ticket, order))
    }

    /// Returns whether anything was removed.
    pub async fn delete_ticket(&self, id: &str) -> bool {
        let mut tickets = self.tickets.lock().await;
        let Some(removed) = tickets.remove(id) else {
            return false;
        };
        self.persist(&tickets).await;
        info!("Deleted ticket {}", removed.ticket_number);
        true
    }

    pub async fn get_ticket(&self, id: &str) -> Result<SupportTicket, StoreError> {
        self.tickets
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::SupportTicket, id))
    }

    pub async fn get_ticket_by_number(&self, ticket_number: &str) -> Result<SupportTicket, StoreError> {
        self.tickets
            .lock()
            .await
            .find(|t| t.ticket_number == ticket_number)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::SupportTicket, ticket_number))
    }

    pub async fn query_tickets(&self, predicate: impl Fn(&SupportTicket) -> bool) -> Vec<SupportTicket> {
        self.tickets.lock().await.query(predicate)
    }

    pub async fn list_tickets(&self) -> Vec<SupportTicket> {
        self.query_tickets(|_| true).await
    }
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
