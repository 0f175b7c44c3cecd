//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{DiagnosticEvent, LeagueEvent, SessionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Applied actions and their deltas
    League,
    /// Rejected or truncated actions
    Diagnostics,
    /// Saves and provider lifecycle
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    League(LeagueEvent),
    Diagnostic(DiagnosticEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::League(_) => Topic::League,
            Event::Diagnostic(_) => Topic::Diagnostics,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    league: broadcast::Sender<Event>,
    diagnostics: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            league: broadcast::channel(capacity).0,
            diagnostics: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::League => &self.league,
            Topic::Diagnostics => &self.diagnostics,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use ballpark_core::Tick;

    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut session_rx = bus.subscribe(Topic::Session);
        let mut league_rx = bus.subscribe(Topic::League);

        bus.publish(Event::Session(SessionEvent::StateSaved { clock: Tick(4) }));

        match session_rx.recv().await.unwrap() {
            Event::Session(SessionEvent::StateSaved { clock }) => assert_eq!(clock, Tick(4)),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(league_rx.try_recv().is_err());
    }
}
