use super::collection::Collection;
use super::{Problems, Store, StoreError};
use crate::model::{CreateTemplateOptions, EntityKind, FormField, PdfTemplate, UpdateTemplateOptions};
use crate::utils::{generate_id, now};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};

fn validate_fields(fields: &[FormField], problems: &mut Problems) {
    let mut names = HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            problems.push(format!("field '{}' has no name", field.label));
            continue;
        }
        if !names.insert(field.name.as_str()) {
            problems.push(format!("duplicate field name '{}'", field.name));
        }
        if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
            if let Err(e) = Regex::new(pattern) {
                problems.push(format!("field '{}' has an invalid pattern: {e}", field.name));
            }
        }
    }
}

fn ensure_slug_free(
    templates: &Collection<PdfTemplate>,
    slug: &str,
    except_id: Option<&str>,
) -> Result<(), StoreError> {
    let taken = templates
        .find(|t| t.slug == slug && Some(t.id.as_str()) != except_id)
        .is_some();
    if taken {
        return Err(StoreError::Conflict(format!(
            "template slug '{slug}' is already in use"
        )));
    }
    Ok(())
}

/// Validate a template draft and mint the record, without inserting it.
pub(super) fn build_template(
    templates: &Collection<PdfTemplate>,
    options: CreateTemplateOptions,
) -> Result<PdfTemplate, StoreError> {
    let mut problems = Problems::new();
    problems.require("name", &options.name);
    validate_fields(&options.fields, &mut problems);
    problems.into_result()?;

    let slug = match options.slug.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => slug::slugify(s),
        _ => slug::slugify(&options.name),
    };
    ensure_slug_free(templates, &slug, None)?;

    Ok(PdfTemplate {
        id: generate_id(),
        name: options.name,
        description: options.description,
        slug,
        category: options.category,
        fields: options.fields,
        created_by: options.created_by,
        created_at: now(),
        is_active: options.is_active,
    })
}

impl Store {
    pub async fn create_template(
        &self,
        options: CreateTemplateOptions,
    ) -> Result<PdfTemplate, StoreError> {
        let mut templates = self.templates.lock().await;
        let template = build_template(&templates, options)?;
        templates.push(template.clone());
        self.persist(&templates).await;
        info!("Created template '{}' ({})", template.name, template.slug);
        Ok(template)
    }

    pub async fn update_template(
        &self,
        id: &str,
        options: UpdateTemplateOptions,
    ) -> Result<PdfTemplate, StoreError> {
        let mut templates = self.templates.lock().await;
        let mut updated = templates
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Template, id))?;

        let mut problems = Problems::new();
        if let Some(name) = &options.name {
            problems.require("name", name);
        }
        if let Some(slug) = &options.slug {
            problems.require("slug", slug);
        }
        if let Some(fields) = &options.fields {
            validate_fields(fields, &mut problems);
        }
        problems.into_result()?;

        if let Some(slug) = options.slug {
            let slug = slug::slugify(slug.trim());
            ensure_slug_free(&templates, &slug, Some(id))?;
            updated.slug = slug;
        }
        if let Some(name) = options.name {
            updated.name = name;
        }
        if let Some(description) = options.description {
            updated.description = description;
        }
        if let Some(category) = options.category {
            updated.category = category;
        }
        if let Some(fields) = options.fields {
            updated.fields = fields;
        }
        if let Some(is_active) = options.is_active {
            updated.is_active = is_active;
        }

        templates.replace(updated.clone());
        self.persist(&templates).await;
        Ok(updated)
    }

    /// Remove a template. Filled forms that reference it are left in place
    /// with a dangling `template_id`. Returns whether anything was removed.
    pub async fn delete_template(&self, id: &str) -> bool {
        let mut templates = self.templates.lock().await;
        let Some(removed) = templates.remove(id) else {
            return false;
        };
        self.persist(&templates).await;
        info!("Deleted template '{}' ({})", removed.name, removed.slug);
        true
    }

    pub async fn get_template(&self, id: &str) -> Result<PdfTemplate, StoreError> {
        self.templates
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Template, id))
    }

    pub async fn get_template_by_slug(&self, slug: &str) -> Result<PdfTemplate, StoreError> {
        self.templates
            .lock()
            .await
            .find(|t| t.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Template, slug))
    }

    pub async fn query_templates(&self, predicate: impl Fn(&PdfTemplate) -> bool) -> Vec<PdfTemplate> {
        self.templates.lock().await.query(predicate)
    }

    pub async fn list_templates(&self) -> Vec<PdfTemplate> {
        self.query_templates(|_| true).await
    }

    pub async fn list_active_templates(&self) -> Vec<PdfTemplate> {
        let active = self.query_templates(|t| t.is_active).await;
        debug!("{} active template(s)", active.len());
        active
    }
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
