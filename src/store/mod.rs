//! The operational data store.
//!
//! `Store` exclusively owns the five collections. Each collection sits behind
//! its own mutex so number minting (read size, mint, append) is atomic. When an
//! operation needs more than one collection it locks them in this fixed order:
//!
//! tickets -> work orders -> templates -> filled forms -> notifications
//!
//! Every successful mutation writes a snapshot of the touched collection
//! before its lock is released, so callers always read their own writes.

mod collection;
mod error;
mod forms;
mod notifications;
mod seed;
mod snapshot;
mod templates;
mod tickets;
mod validation;
mod work_orders;

pub use collection::{Collection, Numbered, Record};
pub use error::StoreError;
pub(crate) use error::Problems;
pub use seed::{default_templates, load_templates_fixture};
pub use snapshot::{Snapshot, SnapshotWriter, CURRENT_SCHEMA_VERSION};
pub use validation::validate_form_data;

use crate::model::{CreateTemplateOptions, FilledForm, Notification, PdfTemplate, SupportTicket, WorkOrder};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Options for opening a store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub data_dir: PathBuf,
    /// Extra attempts for a failed snapshot write
    pub snapshot_retries: u32,
    /// Templates created when no template snapshot exists yet
    pub seed_templates: Vec<CreateTemplateOptions>,
}

impl StoreOptions {
    /// Options with the built-in template seed set.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            data_dir: data_dir.into(),
            snapshot_retries: 3,
            seed_templates: default_templates()?,
        })
    }
}

pub struct Store {
    snapshots: SnapshotWriter,
    tickets: Mutex<Collection<SupportTicket>>,
    work_orders: Mutex<Collection<WorkOrder>>,
    templates: Mutex<Collection<PdfTemplate>>,
    forms: Mutex<Collection<FilledForm>>,
    notifications: Mutex<Collection<Notification>>,
}

impl Store {
    /// Open the store in `options.data_dir`, loading every persisted
    /// collection. Templates are seeded on first run.
    pub async fn open(options: StoreOptions) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(&options.data_dir).await?;
        let snapshots = SnapshotWriter::new(&options.data_dir, options.snapshot_retries);

        let tickets = snapshots.load::<SupportTicket>().await?.unwrap_or_default();
        let work_orders = snapshots.load::<WorkOrder>().await?.unwrap_or_default();
        let forms = snapshots.load::<FilledForm>().await?.unwrap_or_default();
        let notifications = snapshots.load::<Notification>().await?.unwrap_or_default();
        let (templates, seeded) = match snapshots.load::<PdfTemplate>().await? {
            Some(templates) => (templates, false),
            None => (seed::seed_collection(options.seed_templates)?, true),
        };

        let store = Self {
            snapshots,
            tickets: Mutex::new(tickets),
            work_orders: Mutex::new(work_orders),
            templates: Mutex::new(templates),
            forms: Mutex::new(forms),
            notifications: Mutex::new(notifications),
        };

        if seeded {
            let templates = store.templates.lock().await;
            info!("Seeded {} default template(s)", templates.len());
            store.persist(&templates).await;
        }

        info!("Opened store at {}", store.data_dir().display());
        Ok(store)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.snapshots.dir()
    }

    /// Write a final snapshot of every collection.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let tickets = self.tickets.lock().await;
        self.snapshots.write_with_retry(&tickets).await?;
        let work_orders = self.work_orders.lock().await;
        self.snapshots.write_with_retry(&work_orders).await?;
        let templates = self.templates.lock().await;
        self.snapshots.write_with_retry(&templates).await?;
        let forms = self.forms.lock().await;
        self.snapshots.write_with_retry(&forms).await?;
        let notifications = self.notifications.lock().await;
        self.snapshots.write_with_retry(&notifications).await?;
        info!("Flushed store snapshots to {}", self.data_dir().display());
        Ok(())
    }

    /// Write-through after a mutation. Failures are retried, then logged;
    /// the in-memory state stays authoritative.
    async fn persist<T: Record>(&self, collection: &Collection<T>) {
        if let Err(e) = self.snapshots.write_with_retry(collection).await {
            warn!(
                "Could not persist {} snapshot, keeping in-memory state: {e}",
                T::KIND
            );
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
