//! Builders shared by the unit tests.

use crate::model::{
    CreateTemplateOptions, CreateTicketOptions, CreateWorkOrderOptions, FieldType, FormField,
    Priority, WorkOrder, WorkOrderStatus,
};
use crate::store::{Store, StoreOptions};
use crate::utils::now;
use tempfile::TempDir;

/// Store on a fresh temp directory, seeded with the built-in templates.
pub(crate) async fn open_store() -> (TempDir, Store) {
    let temp = tempfile::tempdir().expect("tempdir");
    let options = StoreOptions::new(temp.path()).expect("default seed");
    let store = Store::open(options).await.expect("open store");
    (temp, store)
}

/// Store without any seeded templates.
pub(crate) async fn open_empty_store() -> (TempDir, Store) {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut options = StoreOptions::new(temp.path()).expect("default seed");
    options.seed_templates.clear();
    let store = Store::open(options).await.expect("open store");
    (temp, store)
}

pub(crate) fn work_order_draft(client: &str) -> CreateWorkOrderOptions {
    CreateWorkOrderOptions {
        client_name: client.to_string(),
        client_contact: "contacto@example.com".to_string(),
        client_address: "Calle 10 # 20-30".to_string(),
        description: "Revisión general".to_string(),
        service_type: "Mantenimiento".to_string(),
        priority: Priority::Medium,
        status: WorkOrderStatus::Pending,
        created_by: "2".to_string(),
        ..Default::default()
    }
}

pub(crate) fn ticket_draft(client: &str, category: &str) -> CreateTicketOptions {
    CreateTicketOptions {
        client_name: client.to_string(),
        client_email: "cliente@example.com".to_string(),
        client_phone: "3001234567".to_string(),
        client_company: None,
        subject: "Equipo no enciende".to_string(),
        description: "El equipo de la recepción no enciende".to_string(),
        category: category.to_string(),
        priority: Priority::High,
    }
}

/// Template with one required text field and the technician signature.
pub(crate) fn template_draft(name: &str) -> CreateTemplateOptions {
    CreateTemplateOptions {
        name: name.to_string(),
        description: String::new(),
        slug: None,
        category: "general".to_string(),
        fields: vec![
            FormField::new("observations", "Observaciones", FieldType::Text, true),
            FormField::new(
                "technician_signature",
                "Firma del técnico",
                FieldType::Signature,
                true,
            ),
        ],
        created_by: "1".to_string(),
        is_active: true,
    }
}

/// A persisted-shape work order carrying `number`.
pub(crate) fn work_order_record(number: &str) -> WorkOrder {
    let created_at = now();
    WorkOrder {
        id: crate::utils::generate_id(),
        number: number.to_string(),
        client_name: "Acme".to_string(),
        client_contact: String::new(),
        client_address: String::new(),
        description: String::new(),
        service_type: "Mantenimiento".to_string(),
        priority: Priority::Low,
        status: WorkOrderStatus::Pending,
        assigned_technicians: Vec::new(),
        assigned_formats: Vec::new(),
        created_by: "2".to_string(),
        supervisor_id: None,
        scheduled_date: created_at,
        completed_date: None,
        created_at,
        updated_at: created_at,
        evidences: Vec::new(),
        notes: None,
    }
}
