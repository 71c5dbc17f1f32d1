//! Common test utilities

use fieldops_daemon::model::{CreateTicketOptions, CreateWorkOrderOptions, Priority};
use fieldops_daemon::store::{Store, StoreOptions};
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Open a store in `data_dir` with the built-in template seed set
pub async fn open_store(data_dir: &Path) -> Store {
    let options = StoreOptions::new(data_dir).expect("Built-in templates should parse");
    Store::open(options).await.expect("Failed to open store")
}

#[allow(dead_code)] // Test utility for integration tests
pub fn work_order(client: &str) -> CreateWorkOrderOptions {
    CreateWorkOrderOptions {
        client_name: client.to_string(),
        client_contact: "contacto@example.com".to_string(),
        client_address: "Carrera 7 # 45-10".to_string(),
        description: "Mantenimiento preventivo".to_string(),
        service_type: "Mantenimiento".to_string(),
        created_by: "2".to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)] // Test utility for integration tests
pub fn ticket(client: &str, category: &str) -> CreateTicketOptions {
    CreateTicketOptions {
        client_name: client.to_string(),
        client_email: format!("{}@example.com", client.to_lowercase()),
        client_phone: "3105550000".to_string(),
        client_company: None,
        subject: "Servidor caído".to_string(),
        description: "El servidor principal no responde".to_string(),
        category: category.to_string(),
        priority: Priority::Urgent,
    }
}
