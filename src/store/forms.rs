use super::collection::Collection;
use super::validation::validate_form_data;
use super::{Problems, Store, StoreError};
use crate::model::{
    CreateFilledFormOptions, EntityKind, FilledForm, PdfTemplate, UpdateFilledFormOptions,
};
use crate::utils::{generate_id, now};
use tracing::info;

/// At most one live (non-rejected) form per work order and template.
fn ensure_single_live_form(
    forms: &Collection<FilledForm>,
    work_order_id: &str,
    template_id: &str,
    except_id: Option<&str>,
) -> Result<(), StoreError> {
    let duplicate = forms.find(|f| {
        f.work_order_id == work_order_id
            && f.template_id == template_id
            && f.status.is_live()
            && Some(f.id.as_str()) != except_id
    });
    match duplicate {
        Some(existing) => Err(StoreError::Conflict(format!(
            "form {} already covers this work order and template ({})",
            existing.id, existing.status
        ))),
        None => Ok(()),
    }
}

fn template_for<'a>(
    templates: &'a Collection<PdfTemplate>,
    template_id: &str,
) -> Result<&'a PdfTemplate, StoreError> {
    templates
        .get(template_id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Template, template_id))
}

impl Store {
    /// File a form against an existing work order and template.
    ///
    /// Fails with `Conflict` while another non-rejected form exists for the
    /// same pair; a rejected form may be redone. Forms created as completed
    /// or approved are validated against the template.
    pub async fn create_filled_form(
        &self,
        options: CreateFilledFormOptions,
    ) -> Result<FilledForm, StoreError> {
        let mut problems = Problems::new();
        problems.require("workOrderId", &options.work_order_id);
        problems.require("templateId", &options.template_id);
        problems.require("filledBy", &options.filled_by);
        problems.into_result()?;

        let orders = self.work_orders.lock().await;
        let templates = self.templates.lock().await;
        let mut forms = self.forms.lock().await;

        if orders.get(&options.work_order_id).is_none() {
            return Err(StoreError::not_found(EntityKind::WorkOrder, &options.work_order_id));
        }
        let template = template_for(&templates, &options.template_id)?;
        if options.status.is_live() {
            ensure_single_live_form(&forms, &options.work_order_id, &options.template_id, None)?;
        }
        if options.status.requires_valid_data() {
            validate_form_data(template, &options.data, &options.signatures)?;
        }

        let form = FilledForm {
            id: generate_id(),
            work_order_id: options.work_order_id,
            template_id: options.template_id,
            filled_by: options.filled_by,
            filled_at: now(),
            data: options.data,
            signatures: options.signatures,
            status: options.status,
            pdf_url: None,
        };
        forms.push(form.clone());
        self.persist(&forms).await;
        info!("Filed form {} ({}) for work order {}", form.id, template.slug, form.work_order_id);
        Ok(form)
    }

    /// Merge data and signatures into a form. A completed or approved result
    /// is validated against its template.
    pub async fn update_filled_form(
        &self,
        id: &str,
        options: UpdateFilledFormOptions,
    ) -> Result<FilledForm, StoreError> {
        let templates = self.templates.lock().await;
        let mut forms = self.forms.lock().await;
        let mut updated = forms
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::FilledForm, id))?;
        let previous_status = updated.status;

        updated.data.extend(options.data);
        if let Some(signatures) = options.signatures {
            updated.signatures.merge(signatures);
        }
        if let Some(pdf_url) = options.pdf_url {
            updated.pdf_url = Some(pdf_url);
        }
        if let Some(status) = options.status {
            updated.status = status;
        }

        if updated.status.is_live() && !previous_status.is_live() {
            ensure_single_live_form(&forms, &updated.work_order_id, &updated.template_id, Some(id))?;
        }
        if updated.status.requires_valid_data() {
            let template = template_for(&templates, &updated.template_id)?;
            validate_form_data(template, &updated.data, &updated.signatures)?;
        }

        forms.replace(updated.clone());
        self.persist(&forms).await;
        Ok(updated)
    }

    /// Returns whether anything was removed.
    pub async fn delete_filled_form(&self, id: &str) -> bool {
        let mut forms = self.forms.lock().await;
        if forms.remove(id).is_none() {
            return false;
        }
        self.persist(&forms).await;
        true
    }

    pub async fn get_filled_form(&self, id: &str) -> Result<FilledForm, StoreError> {
        self.forms
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::FilledForm, id))
    }

    pub async fn query_filled_forms(&self, predicate: impl Fn(&FilledForm) -> bool) -> Vec<FilledForm> {
        self.forms.lock().await.query(predicate)
    }

    pub async fn forms_by_work_order(&self, work_order_id: &str) -> Vec<FilledForm> {
        self.query_filled_forms(|f| f.work_order_id == work_order_id)
            .await
    }
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod tests;
