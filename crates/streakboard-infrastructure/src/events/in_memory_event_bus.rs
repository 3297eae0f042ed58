use async_trait::async_trait;
use log::{debug, error, info};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use streakboard_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use streakboard_domain::shared::DomainError;

/// In-memory event bus implementation
/// Handlers run sequentially in registration order on the publisher's task.
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<&'static str, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(&self, handler: Arc<dyn DynamicEventHandler>) {
        let event_type_name = std::any::type_name::<E>();
        let mut handlers = self.handlers.write().await;

        handlers.entry(event_type_name).or_default().push(handler);

        info!("Subscribed handler for event type: {}", event_type_name);
    }

    /// Get the number of handlers for a specific event type
    #[cfg(test)]
    async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let event_type_name = std::any::type_name::<E>();
        let handlers = self.handlers.read().await;
        handlers.get(event_type_name).map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let event_any: &(dyn Any + Send + Sync) = event.as_any();

        debug!("Publishing event: {}", event_type_name);

        let handlers = self.handlers.read().await;

        let Some(event_handlers) = handlers.get(event_type_name) else {
            debug!("No handlers registered for event type: {}", event_type_name);
            return Ok(());
        };

        for handler in event_handlers {
            // A failing handler must not starve the others
            if let Err(e) = handler.handle_dynamic(event_any).await {
                error!(
                    "Handler failed to process event {}: {}",
                    event_type_name,
                    e.format_with_code()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use streakboard_domain::events::habit_events::{HabitCreated, HabitDeleted};
    use streakboard_domain::events::{EventHandler, TypedEventHandlerWrapper};
    use streakboard_domain::habit::Frequency;
    use streakboard_domain::shared::{HabitId, UserId};

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventHandler<HabitCreated> for CountingHandler {
        async fn handle(&self, _event: &HabitCreated) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler<HabitCreated> for FailingHandler {
        async fn handle(&self, _event: &HabitCreated) -> Result<(), DomainError> {
            Err(DomainError::Infrastructure("boom".to_string()))
        }
    }

    fn habit_created() -> Box<HabitCreated> {
        Box::new(HabitCreated {
            habit_id: HabitId::new(),
            user_id: UserId::new(),
            title: "Read".to_string(),
            frequency: Frequency::Daily,
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_event_bus_publishes_to_handlers() {
        let bus = InMemoryEventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let wrapper = Arc::new(TypedEventHandlerWrapper::new(CountingHandler {
            calls: calls.clone(),
        }));
        bus.subscribe::<HabitCreated>(wrapper).await;

        bus.publish(habit_created()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(bus.handler_count::<HabitCreated>().await, 1);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_stop_others() {
        let bus = InMemoryEventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<HabitCreated>(Arc::new(TypedEventHandlerWrapper::new(FailingHandler)))
            .await;
        bus.subscribe::<HabitCreated>(Arc::new(TypedEventHandlerWrapper::new(CountingHandler {
            calls: calls.clone(),
        })))
        .await;

        assert!(bus.publish(habit_created()).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_event_without_handlers_is_ignored() {
        let bus = InMemoryEventBus::new();

        let event = Box::new(HabitDeleted {
            habit_id: HabitId::new(),
            user_id: UserId::new(),
            title: "Read".to_string(),
            occurred_at: Utc::now(),
        });

        assert!(bus.publish(event).await.is_ok());
        assert_eq!(bus.handler_count::<HabitDeleted>().await, 0);
    }
}
