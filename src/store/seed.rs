use super::collection::Collection;
use super::templates::build_template;
use super::StoreError;
use crate::model::{CreateTemplateOptions, PdfTemplate};
use std::path::Path;

const DEFAULT_TEMPLATES_JSON: &str = include_str!("default_templates.json");

/// The eight built-in form templates.
pub fn default_templates() -> Result<Vec<CreateTemplateOptions>, StoreError> {
    Ok(serde_json::from_str(DEFAULT_TEMPLATES_JSON)?)
}

/// Read a replacement seed set from a JSON file with the same shape as the
/// built-in fixture.
pub async fn load_templates_fixture(path: &Path) -> Result<Vec<CreateTemplateOptions>, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

pub(super) fn seed_collection(
    seeds: Vec<CreateTemplateOptions>,
) -> Result<Collection<PdfTemplate>, StoreError> {
    let mut templates = Collection::new();
    for seed in seeds {
        let template = build_template(&templates, seed)?;
        templates.push(template);
    }
    Ok(templates)
}
