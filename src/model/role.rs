use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag supplied by the session provider.
///
/// The wire tag for technicians is `tecnician`; `technician` is accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Supervisor,
    #[serde(rename = "tecnician", alias = "technician")]
    Technician,
    Client,
}

impl Role {
    /// Map a raw role tag. Unknown tags get the technician role, the most
    /// restrictive work-order visibility.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            "supervisor" => Self::Supervisor,
            "client" => Self::Client,
            "tecnician" | "technician" => Self::Technician,
            other => {
                tracing::warn!("Unknown role tag '{other}', applying technician visibility");
                Self::Technician
            }
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::Technician => "tecnician",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity as supplied by the session provider; trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub display_name: String,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            display_name: String::new(),
        }
    }
}
