use super::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Lifecycle: open -> assigned -> in_progress -> resolved -> closed.
    ///
    /// An open or assigned ticket may be (re)assigned; every other move is one
    /// step forward.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open | Self::Assigned, Self::Assigned)
                | (Self::Assigned, Self::InProgress)
                | (Self::InProgress, Self::Resolved)
                | (Self::Resolved, Self::Closed)
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    /// Human number, "TIC-00001"
    pub ticket_number: String,
    pub client_name: String,
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_company: Option<String>,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub internal_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    pub client_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupportTicket {
    /// Contact line used on work orders converted from this ticket.
    #[must_use]
    pub fn contact_line(&self) -> String {
        format!("{} - {}", self.client_email, self.client_phone)
    }
}

/// Client-submitted fields. Status, attachments, notes and visibility are
/// always initialised by the store.
#[derive(Debug, Clone, Default)]
pub struct CreateTicketOptions {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_company: Option<String>,
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
}

/// Non-status edits. Status changes go through the workflow.
#[derive(Debug, Clone, Default)]
pub struct UpdateTicketOptions {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub client_company: Option<String>,
    pub internal_notes: Option<String>,
    pub client_visible: Option<bool>,
    /// Appended to the existing attachment list
    pub add_attachments: Vec<String>,
}

/// Work-order service type for a ticket category.
#[must_use]
pub fn service_type_for_category(category: &str) -> &'static str {
    match category {
        "installation" => "Instalación",
        "maintenance" => "Mantenimiento",
        _ => "Soporte Técnico",
    }
}
