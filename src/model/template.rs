use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Time,
    Select,
    Checkbox,
    Signature,
    Photo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FormField {
    #[must_use]
    pub fn new(name: &str, label: &str, field_type: FieldType, required: bool) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required,
            options: None,
            default_value: None,
            validation: None,
        }
    }
}

/// Named schema of form fields. `slug` is the stable human key work orders
/// reference in `assignedFormats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl PdfTemplate {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Draft for a new template. Also the shape of a seed fixture entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateOptions {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Derived from `name` when absent or blank
    #[serde(default)]
    pub slug: Option<String>,
    pub category: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTemplateOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub fields: Option<Vec<FormField>>,
    pub is_active: Option<bool>,
}
