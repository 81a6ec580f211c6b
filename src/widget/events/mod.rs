//! # Events Module
//!
//! Widget inputs, the events the view model emits, and the bus that lets
//! observers follow them.

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod view_events;

pub use event_bus::{
    tracing_event_bus, EventBus, EventHandler, SimpleEventBus, SubscriptionId, WidgetEvent,
};
pub use model_events::ModelEvent;
pub use types::{ModalPhase, Outcome, SessionId};
pub use view_events::{ViewEvent, WidgetInput};
