//! Event sink adapters.

use std::sync::Mutex;

use crate::infrastructure::ports::{EventEnvelope, EventSinkPort, SinkError};

/// Logs every event through `tracing`. The default sink for a live session.
#[derive(Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSinkPort for TracingEventSink {
    fn publish(&self, envelope: EventEnvelope) -> Result<(), SinkError> {
        tracing::info!(
            event_type = envelope.event.event_type(),
            event_id = %envelope.event_id,
            recorded_at = %envelope.recorded_at,
            "domain event"
        );
        Ok(())
    }
}

/// Collects envelopes in memory so tests and views can inspect them.
#[derive(Default)]
pub struct BufferingEventSink {
    envelopes: Mutex<Vec<EventEnvelope>>,
}

impl BufferingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.envelopes
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    /// Event type names in publication order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.envelopes()
            .iter()
            .map(|envelope| envelope.event.event_type())
            .collect()
    }
}

impl EventSinkPort for BufferingEventSink {
    fn publish(&self, envelope: EventEnvelope) -> Result<(), SinkError> {
        self.envelopes
            .lock()
            .map_err(|_| SinkError::Rejected("buffer lock poisoned".into()))?
            .push(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use decker_domain::{DomainEvent, PlayerId};
    use uuid::Uuid;

    fn envelope() -> EventEnvelope {
        EventEnvelope {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            event: DomainEvent::PlayerCreated {
                player_id: PlayerId::new(),
                name: "Case".into(),
                initial_health: 100,
            },
        }
    }

    #[test]
    fn buffering_sink_preserves_order() {
        let sink = BufferingEventSink::new();
        sink.publish(envelope()).unwrap();
        sink.publish(envelope()).unwrap();

        assert_eq!(sink.envelopes().len(), 2);
        assert_eq!(sink.event_types(), vec!["player_created", "player_created"]);
    }

    #[test]
    fn tracing_sink_accepts_events() {
        let sink = TracingEventSink::new();
        assert!(sink.publish(envelope()).is_ok());
    }
}
