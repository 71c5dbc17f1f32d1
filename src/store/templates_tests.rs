use super::*;
use crate::model::{FieldType, FieldValidation};
use crate::test_fixtures::{open_empty_store, template_draft};

#[tokio::test]
async fn test_create_template_derives_slug() {
    let (_temp, store) = open_empty_store().await;
    let template = store
        .create_template(template_draft("Visita Técnica"))
        .await
        .unwrap();
    assert_eq!(template.slug, "visita-tecnica");
    assert!(template.is_active);
    assert_eq!(
        store.get_template_by_slug("visita-tecnica").await.unwrap().id,
        template.id
    );
}

#[tokio::test]
async fn test_explicit_slug_is_normalized() {
    let (_temp, store) = open_empty_store().await;
    let mut draft = template_draft("Acta");
    draft.slug = Some("Acta Final ".to_string());
    let template = store.create_template(draft).await.unwrap();
    assert_eq!(template.slug, "acta-final");
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let (_temp, store) = open_empty_store().await;
    store.create_template(template_draft("Acta")).await.unwrap();
    let result = store.create_template(template_draft("acta")).await;
    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert_eq!(store.list_templates().await.len(), 1);
}

#[tokio::test]
async fn test_duplicate_field_names_rejected() {
    let (_temp, store) = open_empty_store().await;
    let mut draft = template_draft("Acta");
    draft
        .fields
        .push(FormField::new("observations", "Otra vez", FieldType::Text, false));
    let result = store.create_template(draft).await;
    assert!(matches!(result, Err(StoreError::Validation(msg)) if msg.contains("observations")));
}

#[tokio::test]
async fn test_invalid_pattern_rejected() {
    let (_temp, store) = open_empty_store().await;
    let mut draft = template_draft("Acta");
    draft.fields[0].validation = Some(FieldValidation {
        pattern: Some("([".to_string()),
        ..Default::default()
    });
    assert!(matches!(
        store.create_template(draft).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let (_temp, store) = open_empty_store().await;
    assert!(matches!(
        store.create_template(template_draft("  ")).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn test_update_template_fields_and_slug() {
    let (_temp, store) = open_empty_store().await;
    let template = store.create_template(template_draft("Acta")).await.unwrap();
    let other = store.create_template(template_draft("Informe")).await.unwrap();

    let clash = store
        .update_template(
            &template.id,
            UpdateTemplateOptions {
                slug: Some(other.slug.clone()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(clash, Err(StoreError::Conflict(_))));

    let updated = store
        .update_template(
            &template.id,
            UpdateTemplateOptions {
                name: Some("Acta de cierre".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acta de cierre");
    assert_eq!(updated.slug, "acta");
    assert!(!updated.is_active);
    assert_eq!(store.list_active_templates().await.len(), 1);
}

#[tokio::test]
async fn test_update_unknown_template_is_not_found() {
    let (_temp, store) = open_empty_store().await;
    let result = store
        .update_template("missing", UpdateTemplateOptions::default())
        .await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_template() {
    let (_temp, store) = open_empty_store().await;
    let template = store.create_template(template_draft("Acta")).await.unwrap();
    assert!(store.delete_template(&template.id).await);
    assert!(!store.delete_template(&template.id).await);
    assert!(store.get_template(&template.id).await.is_err());
}
