//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{MatchNotification, PresentationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Animator, audio and HUD requests
    Presentation,
    /// Round and match milestones
    Match,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Presentation, Topic::Match];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Presentation(PresentationEvent),
    Match(MatchNotification),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Presentation(_) => Topic::Presentation,
            Event::Match(_) => Topic::Match,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    presentation: broadcast::Sender<Event>,
    matches: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            presentation: broadcast::channel(capacity).0,
            matches: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Presentation => &self.presentation,
            Topic::Match => &self.matches,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
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
    use super::*;
    use arena_core::{MatchEvent, PresentationRequest};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut matches = bus.subscribe(Topic::Match);
        let mut presentation = bus.subscribe(Topic::Presentation);

        bus.publish(Event::Match(MatchNotification {
            tick: 3,
            event: MatchEvent::Paused,
        }));

        let event = matches.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Match);
        assert!(presentation.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_topic_has_its_own_channel() {
        let bus = EventBus::default();
        let mut receivers: Vec<_> = Topic::ALL
            .iter()
            .map(|&topic| (topic, bus.subscribe(topic)))
            .collect();

        bus.publish(Event::Presentation(PresentationEvent {
            tick: 1,
            request: PresentationRequest::Notice {
                text: "Fight!".to_owned(),
            },
        }));
        bus.publish(Event::Match(MatchNotification {
            tick: 1,
            event: MatchEvent::Fight { round: 1 },
        }));

        for (topic, rx) in &mut receivers {
            assert_eq!(rx.recv().await.unwrap().topic(), *topic);
            assert!(rx.try_recv().is_err());
        }
    }
}
