//! # Event Bus
//!
//! Lets host glue observe the widget without going through a renderer.
//! Observers see every model event and every view event the view model
//! emits, in emission order, and can be detached again.

use super::model_events::ModelEvent;
use super::view_events::ViewEvent;

/// Event as delivered to an observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent<'a> {
    Model(&'a ModelEvent),
    View(&'a ViewEvent),
}

/// Observer callback
pub type EventHandler = Box<dyn FnMut(WidgetEvent<'_>) + Send + Sync>;

/// Handle returned by `subscribe`, used to detach the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait EventBus: Send + Sync {
    fn publish_model_event(&mut self, event: &ModelEvent);

    fn publish_view_event(&mut self, event: &ViewEvent);

    /// Attach an observer
    fn subscribe(&mut self, handler: EventHandler) -> SubscriptionId;

    /// Detach an observer; false if it was not attached
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// In-memory bus calling observers in subscription order
#[derive(Default)]
pub struct SimpleEventBus {
    handlers: Vec<(SubscriptionId, EventHandler)>,
    next_id: u64,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    fn dispatch(&mut self, event: WidgetEvent<'_>) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }
}

impl EventBus for SimpleEventBus {
    fn publish_model_event(&mut self, event: &ModelEvent) {
        self.dispatch(WidgetEvent::Model(event));
    }

    fn publish_view_event(&mut self, event: &ViewEvent) {
        self.dispatch(WidgetEvent::View(event));
    }

    fn subscribe(&mut self, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }
}

/// Bus that traces every model event at debug level
pub fn tracing_event_bus() -> SimpleEventBus {
    let mut bus = SimpleEventBus::new();
    bus.subscribe(Box::new(|event| {
        if let WidgetEvent::Model(model_event) = event {
            tracing::debug!("Widget model event: {:?}", model_event);
        }
    }));
    bus
}
