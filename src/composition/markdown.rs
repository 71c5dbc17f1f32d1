use super::{CompositionError, CompositionRequest, DocumentArtifact, DocumentComposer};
use crate::model::{SignatureSlot, Signatures};
use async_trait::async_trait;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;

const DOCUMENT_TEMPLATE: &str = "document";

const DEFAULT_LAYOUT: &str = "# {{templateName}}

**Orden:** {{number}}
**Cliente:** {{clientName}}
**Dirección:** {{clientAddress}}
**Servicio:** {{serviceType}}
**Fecha programada:** {{scheduledDate}}
**Técnico:** {{technicianName}}

## Datos

{{#each fields}}
- **{{label}}:** {{value}}
{{/each}}

## Firmas

{{#each signatures}}
- {{slot}}: {{#if signed}}firmado{{else}}pendiente{{/if}}
{{/each}}
";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentContext<'a> {
    template_name: &'a str,
    number: &'a str,
    client_name: &'a str,
    client_address: &'a str,
    service_type: &'a str,
    scheduled_date: String,
    technician_name: &'a str,
    fields: Vec<FieldLine<'a>>,
    signatures: Vec<SignatureLine>,
}

#[derive(Serialize)]
struct FieldLine<'a> {
    label: &'a str,
    value: String,
}

#[derive(Serialize)]
struct SignatureLine {
    slot: &'static str,
    signed: bool,
}

/// Renders a filed form as a Markdown document.
pub struct MarkdownComposer {
    handlebars: Handlebars<'static>,
}

impl MarkdownComposer {
    pub fn new() -> Result<Self, CompositionError> {
        Self::with_layout(DEFAULT_LAYOUT)
    }

    /// Use a custom Handlebars layout. Fails if the layout does not parse.
    pub fn with_layout(layout: &str) -> Result<Self, CompositionError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(DOCUMENT_TEMPLATE, layout)?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, request: &CompositionRequest) -> Result<String, CompositionError> {
        let context = DocumentContext {
            template_name: &request.template.name,
            number: &request.work_order.number,
            client_name: &request.client_name,
            client_address: &request.work_order.client_address,
            service_type: &request.work_order.service_type,
            scheduled_date: request.work_order.scheduled_date.format("%Y-%m-%d").to_string(),
            technician_name: &request.technician_name,
            fields: field_lines(request),
            signatures: signature_lines(&request.form.signatures),
        };
        Ok(self.handlebars.render(DOCUMENT_TEMPLATE, &context)?)
    }
}

/// Template fields in declaration order; signature fields are listed under
/// the signature section instead.
fn field_lines(request: &CompositionRequest) -> Vec<FieldLine<'_>> {
    request
        .template
        .fields
        .iter()
        .filter(|field| SignatureSlot::for_field(&field.name).is_none())
        .filter_map(|field| {
            request.form.data.get(&field.name).map(|value| FieldLine {
                label: &field.label,
                value: display_value(value),
            })
        })
        .collect()
}

fn signature_lines(signatures: &Signatures) -> Vec<SignatureLine> {
    [
        (SignatureSlot::Technician, "Técnico"),
        (SignatureSlot::Client, "Cliente"),
        (SignatureSlot::Supervisor, "Supervisor"),
    ]
    .into_iter()
    .map(|(slot, label)| SignatureLine {
        slot: label,
        signed: signatures.get(slot).is_some(),
    })
    .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Sí".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentComposer for MarkdownComposer {
    async fn compose(
        &self,
        request: &CompositionRequest,
    ) -> Result<DocumentArtifact, CompositionError> {
        Ok(DocumentArtifact::Bytes(self.render(request)?.into_bytes()))
    }
}
