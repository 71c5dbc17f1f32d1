use super::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Assigned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Photo,
    Document,
    Signature,
}

/// Proof of work attached to a work order. Owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    /// Human number, "OT-00001"
    pub number: String,
    pub client_name: String,
    pub client_contact: String,
    pub client_address: String,
    pub description: String,
    pub service_type: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub assigned_technicians: Vec<String>,
    /// Template slugs the technicians must fill for this order
    #[serde(default)]
    pub assigned_formats: Vec<String>,
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub evidences: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkOrder {
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_technicians.iter().any(|t| t == user_id)
    }
}

/// Draft for a new work order. Id, number and timestamps are minted by the store.
#[derive(Debug, Clone, Default)]
pub struct CreateWorkOrderOptions {
    pub client_name: String,
    pub client_contact: String,
    pub client_address: String,
    pub description: String,
    pub service_type: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub assigned_technicians: Vec<String>,
    pub assigned_formats: Vec<String>,
    pub created_by: String,
    pub supervisor_id: Option<String>,
    /// Defaults to the creation time when absent
    pub scheduled_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateWorkOrderOptions {
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub client_address: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkOrderStatus>,
    pub assigned_technicians: Option<Vec<String>>,
    pub assigned_formats: Option<Vec<String>>,
    pub supervisor_id: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddEvidenceOptions {
    pub kind: EvidenceKind,
    pub url: String,
    pub description: String,
    pub uploaded_by: String,
}
