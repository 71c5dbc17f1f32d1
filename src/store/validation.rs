use super::{Problems, StoreError};
use crate::model::{FieldType, FormField, PdfTemplate, SignatureSlot, Signatures};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_value(field: &FormField, value: &Value, problems: &mut Problems) {
    let label = &field.label;
    if field.field_type == FieldType::Number {
        match as_number(value) {
            Some(n) => {
                let bounds = field.validation.as_ref();
                if let Some(min) = bounds.and_then(|v| v.min) {
                    if n < min {
                        problems.push(format!("'{label}' must be at least {min}"));
                    }
                }
                if let Some(max) = bounds.and_then(|v| v.max) {
                    if n > max {
                        problems.push(format!("'{label}' must be at most {max}"));
                    }
                }
            }
            None => problems.push(format!("'{label}' must be a number")),
        }
    }

    if field.field_type == FieldType::Select {
        if let (Some(options), Some(choice)) = (&field.options, value.as_str()) {
            if !options.iter().any(|o| o == choice) {
                problems.push(format!("'{label}' must be one of: {}", options.join(", ")));
            }
        }
    }

    if let (Some(pattern), Some(text)) = (
        field.validation.as_ref().and_then(|v| v.pattern.as_deref()),
        value.as_str(),
    ) {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(text) => {
                problems.push(format!("'{label}' does not match the expected format"));
            }
            Ok(_) => {}
            Err(e) => problems.push(format!("'{label}' has an invalid pattern: {e}")),
        }
    }
}

/// Check form data against its template.
///
/// Required fields must be present and non-blank; a signature field is also
/// satisfied by the matching captured signature slot. Number bounds, select
/// choices and regex patterns apply to every supplied value. Data keys the
/// template does not declare are allowed.
pub fn validate_form_data(
    template: &PdfTemplate,
    data: &BTreeMap<String, Value>,
    signatures: &Signatures,
) -> Result<(), StoreError> {
    let mut problems = Problems::new();
    for field in &template.fields {
        let value = data.get(&field.name).filter(|v| !is_blank(v));
        let signed = field.field_type == FieldType::Signature
            && SignatureSlot::for_field(&field.name).is_some_and(|slot| signatures.get(slot).is_some());

        match value {
            Some(value) => check_value(field, value, &mut problems),
            None if field.required && !signed => {
                problems.push(format!("'{}' is required", field.label));
            }
            None => {}
        }
    }
    problems.into_result()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
