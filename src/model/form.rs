use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Completed,
    Approved,
    Rejected,
}

impl FormStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Completed => "completed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the form counts toward the one-live-form-per-template rule.
    #[must_use]
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Filed forms must satisfy their template.
    #[must_use]
    pub fn requires_valid_data(self) -> bool {
        matches!(self, Self::Completed | Self::Approved)
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureSlot {
    Technician,
    Client,
    Supervisor,
}

impl SignatureSlot {
    /// Slot backing a signature field, by the field-name convention
    /// `technician_signature` / `client_signature` / `supervisor_signature`.
    #[must_use]
    pub fn for_field(field_name: &str) -> Option<Self> {
        match field_name.strip_suffix("_signature")? {
            "technician" => Some(Self::Technician),
            "client" => Some(Self::Client),
            "supervisor" => Some(Self::Supervisor),
            _ => None,
        }
    }
}

/// Captured signature images, opaque to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
}

impl Signatures {
    #[must_use]
    pub fn get(&self, slot: SignatureSlot) -> Option<&str> {
        match slot {
            SignatureSlot::Technician => self.technician.as_deref(),
            SignatureSlot::Client => self.client.as_deref(),
            SignatureSlot::Supervisor => self.supervisor.as_deref(),
        }
        .filter(|s| !s.is_empty())
    }

    /// Overlay the slots present in `other`.
    pub fn merge(&mut self, other: Signatures) {
        if other.technician.is_some() {
            self.technician = other.technician;
        }
        if other.client.is_some() {
            self.client = other.client;
        }
        if other.supervisor.is_some() {
            self.supervisor = other.supervisor;
        }
    }
}

/// One filled instance of a template against a work order.
///
/// `work_order_id` and `template_id` are weak references: deleting the
/// referenced entity leaves them dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledForm {
    pub id: String,
    pub work_order_id: String,
    pub template_id: String,
    pub filled_by: String,
    pub filled_at: DateTime<Utc>,
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
    #[serde(default)]
    pub signatures: Signatures,
    pub status: FormStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateFilledFormOptions {
    pub work_order_id: String,
    pub template_id: String,
    pub filled_by: String,
    pub data: BTreeMap<String, Value>,
    pub signatures: Signatures,
    pub status: FormStatus,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFilledFormOptions {
    /// Merged key-by-key into the existing data
    pub data: BTreeMap<String, Value>,
    pub signatures: Option<Signatures>,
    pub status: Option<FormStatus>,
    pub pdf_url: Option<String>,
}
