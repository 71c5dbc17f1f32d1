use super::collection::Collection;
use super::{Problems, Store, StoreError};
use crate::model::{
    dedup_preserving_order, AddEvidenceOptions, CreateWorkOrderOptions, EntityKind, Evidence,
    UpdateWorkOrderOptions, WorkOrder, WorkOrderStatus,
};
use crate::utils::{generate_id, next_timestamp, now};
use tracing::info;

fn validate_draft(options: &CreateWorkOrderOptions) -> Result<(), StoreError> {
    let mut problems = Problems::new();
    problems.require("clientName", &options.client_name);
    problems.require("createdBy", &options.created_by);
    problems.into_result()
}

/// Validate a draft, mint id/number/timestamps and append the order.
///
/// Caller holds the work-order lock and persists afterwards.
pub(crate) fn insert_work_order(
    orders: &mut Collection<WorkOrder>,
    options: CreateWorkOrderOptions,
) -> Result<WorkOrder, StoreError> {
    validate_draft(&options)?;
    let number = orders.next_number();
    let created_at = now();
    let order = WorkOrder {
        id: generate_id(),
        number,
        client_name: options.client_name,
        client_contact: options.client_contact,
        client_address: options.client_address,
        description: options.description,
        service_type: options.service_type,
        priority: options.priority,
        status: options.status,
        assigned_technicians: dedup_preserving_order(options.assigned_technicians),
        assigned_formats: dedup_preserving_order(options.assigned_formats),
        created_by: options.created_by,
        supervisor_id: options.supervisor_id,
        scheduled_date: options.scheduled_date.unwrap_or(created_at),
        completed_date: None,
        created_at,
        updated_at: created_at,
        evidences: Vec::new(),
        notes: options.notes,
    };
    orders.push(order.clone());
    Ok(order)
}

fn apply_update(order: &mut WorkOrder, options: UpdateWorkOrderOptions) -> Result<(), StoreError> {
    let mut problems = Problems::new();
    if let Some(name) = &options.client_name {
        problems.require("clientName", name);
    }
    problems.into_result()?;

    if let Some(v) = options.client_name {
        order.client_name = v;
    }
    if let Some(v) = options.client_contact {
        order.client_contact = v;
    }
    if let Some(v) = options.client_address {
        order.client_address = v;
    }
    if let Some(v) = options.description {
        order.description = v;
    }
    if let Some(v) = options.service_type {
        order.service_type = v;
    }
    if let Some(v) = options.priority {
        order.priority = v;
    }
    if let Some(v) = options.assigned_technicians {
        order.assigned_technicians = dedup_preserving_order(v);
    }
    if let Some(v) = options.assigned_formats {
        order.assigned_formats = dedup_preserving_order(v);
    }
    if let Some(v) = options.supervisor_id {
        order.supervisor_id = Some(v);
    }
    if let Some(v) = options.scheduled_date {
        order.scheduled_date = v;
    }
    if let Some(v) = options.notes {
        order.notes = Some(v);
    }
    if let Some(v) = options.completed_date {
        order.completed_date = Some(v);
    }
    if let Some(status) = options.status {
        order.status = status;
        if status == WorkOrderStatus::Completed {
            order.completed_date.get_or_insert_with(now);
        } else {
            // Reopened or cancelled orders are no longer completed
            order.completed_date = None;
        }
    }
    order.updated_at = next_timestamp(order.updated_at);
    Ok(())
}

impl Store {
    pub async fn create_work_order(
        &self,
        options: CreateWorkOrderOptions,
    ) -> Result<WorkOrder, StoreError> {
        let mut orders = self.work_orders.lock().await;
        let order = insert_work_order(&mut orders, options)?;
        self.persist(&orders).await;
        info!("Created work order {} for {}", order.number, order.client_name);
        Ok(order)
    }

    /// Merge the given fields into an order and refresh `updated_at`.
    pub async fn update_work_order(
        &self,
        id: &str,
        options: UpdateWorkOrderOptions,
    ) -> Result<WorkOrder, StoreError> {
        let mut orders = self.work_orders.lock().await;
        let mut updated = orders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::WorkOrder, id))?;
        apply_update(&mut updated, options)?;
        orders.replace(updated.clone());
        self.persist(&orders).await;
        Ok(updated)
    }

    /// Remove an order and its evidence. Filled forms referencing it are kept.
    /// Returns whether anything was removed.
    pub async fn delete_work_order(&self, id: &str) -> bool {
        let mut orders = self.work_orders.lock().await;
        let Some(removed) = orders.remove(id) else {
            return false;
        };
        self.persist(&orders).await;
        info!("Deleted work order {}", removed.number);
        true
    }

    pub async fn get_work_order(&self, id: &str) -> Result<WorkOrder, StoreError> {
        self.work_orders
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::WorkOrder, id))
    }

    pub async fn get_work_order_by_number(&self, number: &str) -> Result<WorkOrder, StoreError> {
        self.work_orders
            .lock()
            .await
            .find(|o| o.number == number)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::WorkOrder, number))
    }

    /// Orders matching `predicate`, in creation order.
    pub async fn query_work_orders(&self, predicate: impl Fn(&WorkOrder) -> bool) -> Vec<WorkOrder> {
        self.work_orders.lock().await.query(predicate)
    }

    pub async fn list_work_orders(&self) -> Vec<WorkOrder> {
        self.query_work_orders(|_| true).await
    }

    pub async fn add_evidence(
        &self,
        work_order_id: &str,
        options: AddEvidenceOptions,
    ) -> Result<Evidence, StoreError> {
        let mut problems = Problems::new();
        problems.require("url", &options.url);
        problems.require("uploadedBy", &options.uploaded_by);
        problems.into_result()?;

        let mut orders = self.work_orders.lock().await;
        let order = orders
            .get_mut(work_order_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::WorkOrder, work_order_id))?;
        let evidence = Evidence {
            id: generate_id(),
            kind: options.kind,
            url: options.url,
            description: options.description,
            uploaded_by: options.uploaded_by,
            uploaded_at: now(),
        };
        order.evidences.push(evidence.clone());
        order.updated_at = next_timestamp(order.updated_at);
        self.persist(&orders).await;
        Ok(evidence)
    }

    pub async fn remove_evidence(
        &self,
        work_order_id: &str,
        evidence_id: &str,
    ) -> Result<Evidence, StoreError> {
        let mut orders = self.work_orders.lock().await;
        let order = orders
            .get_mut(work_order_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::WorkOrder, work_order_id))?;
        let index = order
            .evidences
            .iter()
            .position(|e| e.id == evidence_id)
            .ok_or_else(|| StoreError::EvidenceNotFound(evidence_id.to_string()))?;
        let evidence = order.evidences.remove(index);
        order.updated_at = next_timestamp(order.updated_at);
        self.persist(&orders).await;
        Ok(evidence)
    }
}

#[cfg(test)]
#[path = "work_orders_tests.rs"]
mod tests;
