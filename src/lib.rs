// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing
    )
)]

pub mod composition;
pub mod config;
pub mod logging;
pub mod model;
pub mod numbering;
pub mod store;
pub mod utils;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use composition::{
    compose_form_document, CompositionError, CompositionRequest, DocumentArtifact,
    DocumentComposer, MarkdownComposer,
};
pub use config::{load_store_config, ConfigError, StoreConfig};
pub use model::{
    CreateFilledFormOptions, CreateNotificationOptions, CreateTemplateOptions,
    CreateTicketOptions, CreateWorkOrderOptions, EntityKind, FilledForm, FormStatus, Identity,
    Notification, PdfTemplate, Priority, Role, SupportTicket, TicketStatus, WorkOrder,
    WorkOrderStatus,
};
pub use store::{Store, StoreError, StoreOptions};
pub use views::{DashboardSummary, OperationsReport, ReportFilter, Visibility};
pub use workflow::{
    ConvertTicketOptions, EventDispatcher, EventSink, TicketWorkflow, WorkflowEvent,
    WorkflowSettings,
};
