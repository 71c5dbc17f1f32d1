use crate::model::{FilledForm, PdfTemplate, WorkOrder, WorkOrderStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Restricts a report by creation date (inclusive) and status.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub status: Option<WorkOrderStatus>,
}

impl ReportFilter {
    #[must_use]
    pub fn matches(&self, order: &WorkOrder) -> bool {
        self.from.is_none_or(|from| order.created_at >= from)
            && self.to.is_none_or(|to| order.created_at <= to)
            && self.status.is_none_or(|status| order.status == status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUsage {
    pub name: String,
    pub slug: String,
    pub usage: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsReport {
    pub total_orders: usize,
    /// Count per status; every status is present, zero included
    pub by_status: BTreeMap<String, usize>,
    pub by_service_type: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM` of creation
    pub by_month: BTreeMap<String, usize>,
    /// Forms filed against the orders in the report
    pub forms_filed: usize,
    /// Most used first
    pub template_usage: Vec<TemplateUsage>,
}

impl OperationsReport {
    #[must_use]
    pub fn build(
        orders: &[WorkOrder],
        forms: &[FilledForm],
        templates: &[PdfTemplate],
        filter: &ReportFilter,
    ) -> Self {
        let selected: Vec<&WorkOrder> = orders.iter().filter(|o| filter.matches(o)).collect();

        let mut by_status: BTreeMap<String, usize> = WorkOrderStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut by_service_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
        for order in &selected {
            *by_status.entry(order.status.as_str().to_string()).or_default() += 1;
            *by_service_type.entry(order.service_type.clone()).or_default() += 1;
            *by_month
                .entry(order.created_at.format("%Y-%m").to_string())
                .or_default() += 1;
        }

        let selected_ids: HashSet<&str> = selected.iter().map(|o| o.id.as_str()).collect();
        let forms_filed = forms
            .iter()
            .filter(|f| selected_ids.contains(f.work_order_id.as_str()))
            .count();

        let mut template_usage: Vec<TemplateUsage> = templates
            .iter()
            .map(|t| TemplateUsage {
                name: t.name.clone(),
                slug: t.slug.clone(),
                usage: forms.iter().filter(|f| f.template_id == t.id).count(),
            })
            .collect();
        template_usage.sort_by(|a, b| b.usage.cmp(&a.usage));

        Self {
            total_orders: selected.len(),
            by_status,
            by_service_type,
            by_month,
            forms_filed,
            template_usage,
        }
    }

    #[must_use]
    pub fn count(&self, status: WorkOrderStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
