use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Side effects of a workflow transition, delivered after it commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    #[serde(rename_all = "camelCase")]
    TicketCreated {
        ticket_id: String,
        ticket_number: String,
        client_name: String,
    },
    #[serde(rename_all = "camelCase")]
    TicketAssigned {
        ticket_id: String,
        ticket_number: String,
        technician_id: String,
    },
    #[serde(rename_all = "camelCase")]
    WorkOrderCreated {
        work_order_id: String,
        number: String,
        ticket_id: String,
        ticket_number: String,
        technician_ids: Vec<String>,
    },
}

/// Receives workflow events.
#[async_trait]
pub trait EventSink: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, event: &WorkflowEvent) -> anyhow::Result<()>;
}

/// Fans events out to every registered sink.
///
/// A failing sink is logged and skipped; it never undoes the transition that
/// produced the event.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn add_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver events in order. Returns the number of failed deliveries.
    pub async fn dispatch(&self, events: &[WorkflowEvent]) -> usize {
        let mut failures = 0;
        for event in events {
            let results = join_all(self.sinks.iter().map(|sink| sink.deliver(event))).await;
            for (sink, result) in self.sinks.iter().zip(results) {
                match result {
                    Ok(()) => debug!("Delivered {event:?} to {}", sink.name()),
                    Err(e) => {
                        failures += 1;
                        warn!("Sink {} failed to deliver {event:?}: {e:#}", sink.name());
                    }
                }
            }
        }
        failures
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
