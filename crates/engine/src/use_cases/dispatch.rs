//! Event dispatch.
//!
//! Services hand raised domain events to the dispatcher after a successful
//! save, never before. The dispatcher stamps each event into an envelope and
//! forwards it to the sink; a misbehaving sink is logged and skipped so the
//! core never blocks on event consumption.

use std::sync::Arc;

use uuid::Uuid;

use crate::infrastructure::ports::{ClockPort, EventEnvelope, EventSinkPort};
use decker_domain::DomainEvent;

pub struct EventDispatcher {
    sink: Arc<dyn EventSinkPort>,
    clock: Arc<dyn ClockPort>,
}

impl EventDispatcher {
    pub fn new(sink: Arc<dyn EventSinkPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { sink, clock }
    }

    /// Stamp and publish a batch of events in order.
    pub fn dispatch(&self, events: Vec<DomainEvent>) {
        for event in events {
            let envelope = EventEnvelope {
                event_id: Uuid::new_v4(),
                recorded_at: self.clock.now(),
                event,
            };
            if let Err(error) = self.sink.publish(envelope) {
                tracing::warn!(error = %error, "event sink rejected envelope, dropping");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::event_sink::BufferingEventSink;
    use crate::infrastructure::ports::{MockEventSinkPort, SinkError};
    use chrono::{TimeZone, Utc};
    use decker_domain::PlayerId;

    fn player_created() -> DomainEvent {
        DomainEvent::PlayerCreated {
            player_id: PlayerId::new(),
            name: "Case".into(),
            initial_health: 100,
        }
    }

    #[test]
    fn dispatch_stamps_envelopes_with_clock_time() {
        let sink = Arc::new(BufferingEventSink::new());
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid ts");
        let dispatcher = EventDispatcher::new(sink.clone(), Arc::new(FixedClock(now)));

        dispatcher.dispatch(vec![player_created(), player_created()]);

        let envelopes = sink.envelopes();
        assert_eq!(envelopes.len(), 2);
        assert!(envelopes.iter().all(|e| e.recorded_at == now));
        // Every envelope gets its own identity
        assert_ne!(envelopes[0].event_id, envelopes[1].event_id);
    }

    #[test]
    fn sink_failure_is_swallowed() {
        let mut sink = MockEventSinkPort::new();
        sink.expect_publish()
            .returning(|_| Err(SinkError::Rejected("down".into())));
        let dispatcher = EventDispatcher::new(
            Arc::new(sink),
            Arc::new(FixedClock(Utc::now())),
        );

        // Must not panic or propagate
        dispatcher.dispatch(vec![player_created()]);
    }
}
