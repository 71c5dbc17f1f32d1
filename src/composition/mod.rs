//! Contract with the document renderer.
//!
//! The store only assembles and validates the inputs; rendering is done by a
//! [`DocumentComposer`] outside every collection lock, and the artifact is
//! never inspected.

mod markdown;

pub use markdown::MarkdownComposer;

use crate::model::{FilledForm, FormStatus, PdfTemplate, UpdateFilledFormOptions, WorkOrder};
use crate::store::{validate_form_data, Store, StoreError};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
    #[error("Form {0} is {1} and cannot be rendered")]
    FormNotReady(String, FormStatus),
    #[error("Renderer failed: {0}")]
    Renderer(String),
}

/// Everything a renderer receives.
#[derive(Debug, Clone)]
pub struct CompositionRequest {
    pub work_order: WorkOrder,
    pub template: PdfTemplate,
    pub form: FilledForm,
    pub technician_name: String,
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentArtifact {
    Bytes(Vec<u8>),
    Uri(String),
}

#[async_trait]
pub trait DocumentComposer: Send + Sync {
    async fn compose(
        &self,
        request: &CompositionRequest,
    ) -> Result<DocumentArtifact, CompositionError>;
}

impl Store {
    /// Resolve a completed or approved form into a composition request.
    ///
    /// Dangling work-order or template references are reported as
    /// `NotFound`; the form data is re-validated against the template.
    pub async fn composition_request(
        &self,
        form_id: &str,
        technician_name: &str,
        client_name: &str,
    ) -> Result<CompositionRequest, CompositionError> {
        let form = self.get_filled_form(form_id).await?;
        if !matches!(form.status, FormStatus::Completed | FormStatus::Approved) {
            return Err(CompositionError::FormNotReady(form.id, form.status));
        }
        let work_order = self.get_work_order(&form.work_order_id).await?;
        let template = self.get_template(&form.template_id).await?;
        validate_form_data(&template, &form.data, &form.signatures)?;
        Ok(CompositionRequest {
            work_order,
            template,
            form,
            technician_name: technician_name.to_string(),
            client_name: client_name.to_string(),
        })
    }
}

/// Render a filed form. A returned URI is recorded as the form's `pdfUrl`.
pub async fn compose_form_document(
    store: &Store,
    composer: &dyn DocumentComposer,
    form_id: &str,
    technician_name: &str,
    client_name: &str,
) -> Result<DocumentArtifact, CompositionError> {
    let request = store
        .composition_request(form_id, technician_name, client_name)
        .await?;
    let artifact = composer.compose(&request).await?;
    if let DocumentArtifact::Uri(uri) = &artifact {
        store
            .update_filled_form(
                form_id,
                UpdateFilledFormOptions {
                    pdf_url: Some(uri.clone()),
                    ..Default::default()
                },
            )
            .await?;
    }
    info!(
        "Composed {} for work order {}",
        request.template.slug, request.work_order.number
    );
    Ok(artifact)
}

#[cfg(test)]
#[path = "composition_tests.rs"]
mod tests;
