//! Support-ticket workflow.
//!
//! Transition rules live in [`transitions`] as plain functions over a ticket,
//! so they can be exercised without a store. [`TicketWorkflow`] applies them
//! through the store and hands the resulting [`WorkflowEvent`]s to an
//! [`EventDispatcher`] once every lock is released.

mod engine;
mod events;
mod notify;
pub mod transitions;

pub use engine::{
    AssignTicketResult, ConvertTicketOptions, ConvertTicketResult, CreateTicketResult,
    TicketWorkflow, WorkflowSettings,
};
pub use events::{EventDispatcher, EventSink, WorkflowEvent};
pub use notify::NotificationSink;
