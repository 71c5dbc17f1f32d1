//! Entity types shared by the store, the ticket workflow and the views.

mod form;
mod notification;
mod priority;
mod role;
mod template;
mod ticket;
mod work_order;

pub use form::{
    CreateFilledFormOptions, FilledForm, FormStatus, SignatureSlot, Signatures,
    UpdateFilledFormOptions,
};
pub use notification::{CreateNotificationOptions, Notification, NotificationKind};
pub use priority::Priority;
pub use role::{Identity, Role};
pub use template::{
    CreateTemplateOptions, FieldType, FieldValidation, FormField, PdfTemplate,
    UpdateTemplateOptions,
};
pub use ticket::{
    service_type_for_category, CreateTicketOptions, SupportTicket, TicketStatus,
    UpdateTicketOptions,
};
pub use work_order::{
    AddEvidenceOptions, CreateWorkOrderOptions, Evidence, EvidenceKind, UpdateWorkOrderOptions,
    WorkOrder, WorkOrderStatus,
};

use std::fmt;

/// The five collections owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    WorkOrder,
    SupportTicket,
    Template,
    FilledForm,
    Notification,
}

impl EntityKind {
    /// Snapshot file name for this collection.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::WorkOrder => "work_orders.json",
            Self::SupportTicket => "support_tickets.json",
            Self::Template => "templates.json",
            Self::FilledForm => "filled_forms.json",
            Self::Notification => "notifications.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WorkOrder => "Work order",
            Self::SupportTicket => "Support ticket",
            Self::Template => "Template",
            Self::FilledForm => "Filled form",
            Self::Notification => "Notification",
        };
        f.write_str(name)
    }
}

/// Drop repeated ids while keeping first-seen order.
pub(crate) fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
