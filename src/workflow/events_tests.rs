use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    seen: Mutex<Vec<WorkflowEvent>>,
}

#[async_trait]
impl EventSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, event: &WorkflowEvent) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(event.clone());
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl EventSink for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    async fn deliver(&self, _event: &WorkflowEvent) -> anyhow::Result<()> {
        anyhow::bail!("sink offline")
    }
}

fn created(n: u32) -> WorkflowEvent {
    WorkflowEvent::TicketCreated {
        ticket_id: format!("id-{n}"),
        ticket_number: format!("TIC-{n:05}"),
        client_name: "Acme".to_string(),
    }
}

#[tokio::test]
async fn test_dispatch_delivers_in_order() {
    let sink = Arc::new(RecordingSink::default());
    let dispatcher = EventDispatcher::new().with_sink(sink.clone());
    let failures = dispatcher.dispatch(&[created(1), created(2)]).await;
    assert_eq!(failures, 0);
    assert_eq!(*sink.seen.lock().unwrap(), vec![created(1), created(2)]);
}

#[tokio::test]
async fn test_failing_sink_does_not_block_others() {
    let sink = Arc::new(RecordingSink::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_sink(Arc::new(FailingSink));
    dispatcher.add_sink(sink.clone());
    assert_eq!(dispatcher.sink_count(), 2);

    let failures = dispatcher.dispatch(&[created(1)]).await;
    assert_eq!(failures, 1);
    assert_eq!(sink.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dispatch_without_sinks() {
    assert_eq!(EventDispatcher::new().dispatch(&[created(1)]).await, 0);
}

#[test]
fn test_event_serialization() {
    let json = serde_json::to_value(created(1)).unwrap();
    assert_eq!(json["event"], "ticket_created");
    assert_eq!(json["ticketNumber"], "TIC-00001");
}
