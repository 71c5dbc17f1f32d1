//! Role-scoped, read-only projections of the store.
//!
//! Computed fresh on every call; nothing here mutates or caches state.

mod report;

pub use report::{OperationsReport, ReportFilter, TemplateUsage};

use crate::model::{Identity, Notification, Role, SupportTicket, WorkOrder, WorkOrderStatus};
use crate::store::Store;
use serde::Serialize;

/// Which work orders a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every order
    All,
    /// Orders the user supervises or created
    Supervised,
    /// Orders the user is assigned to
    Assigned,
}

impl Visibility {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::All,
            Role::Supervisor => Self::Supervised,
            Role::Technician | Role::Client => Self::Assigned,
        }
    }

    #[must_use]
    pub fn allows(self, user_id: &str, order: &WorkOrder) -> bool {
        match self {
            Self::All => true,
            Self::Supervised => {
                order.supervisor_id.as_deref() == Some(user_id) || order.created_by == user_id
            }
            Self::Assigned => order.is_assigned_to(user_id),
        }
    }
}

/// Headline counts for a user's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub visible_orders: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub active_templates: usize,
    pub unread_notifications: usize,
}

impl Store {
    /// Work orders visible to `identity`, in creation order.
    pub async fn work_orders_for(&self, identity: &Identity) -> Vec<WorkOrder> {
        let visibility = Visibility::for_role(identity.role);
        self.query_work_orders(|order| visibility.allows(&identity.user_id, order))
            .await
    }

    /// Same as [`Store::work_orders_for`] for a raw role tag; unknown tags get
    /// the assigned-technician rule.
    pub async fn work_orders_for_tag(&self, user_id: &str, role_tag: &str) -> Vec<WorkOrder> {
        let identity = Identity::new(user_id, Role::from_tag(role_tag));
        self.work_orders_for(&identity).await
    }

    pub async fn unread_count(&self, user_id: &str) -> usize {
        self.query_notifications(|n| n.user_id == user_id && !n.read)
            .await
            .len()
    }

    /// A user's notifications, newest first.
    pub async fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        let mut notifications = self.query_notifications(|n| n.user_id == user_id).await;
        notifications.reverse();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    /// Tickets a client submitted, matched by contact email.
    pub async fn client_tickets(&self, client_email: &str) -> Vec<SupportTicket> {
        let email = client_email.trim().to_lowercase();
        self.query_tickets(|t| t.client_visible && t.client_email.trim().to_lowercase() == email)
            .await
    }

    pub async fn dashboard(&self, identity: &Identity) -> DashboardSummary {
        let orders = self.work_orders_for(identity).await;
        let count = |status: WorkOrderStatus| orders.iter().filter(|o| o.status == status).count();
        DashboardSummary {
            visible_orders: orders.len(),
            pending: count(WorkOrderStatus::Pending),
            in_progress: count(WorkOrderStatus::InProgress),
            completed: count(WorkOrderStatus::Completed),
            active_templates: self.list_active_templates().await.len(),
            unread_notifications: self.unread_count(&identity.user_id).await,
        }
    }

    /// Aggregate report over all work orders matching `filter`.
    pub async fn operations_report(&self, filter: &ReportFilter) -> OperationsReport {
        let orders = self.list_work_orders().await;
        let templates = self.list_templates().await;
        let forms = self.query_filled_forms(|_| true).await;
        OperationsReport::build(&orders, &forms, &templates, filter)
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
