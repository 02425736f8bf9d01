//! Headless, typed, topic-based publish/subscribe event bus.
//!
//! Uses [`tokio::sync::broadcast`] channels under the hood so that every
//! subscriber receives every message without any single subscriber blocking
//! the others.
//!
//! # Topics
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::Navigation`] | Go-back requests, fired commands |
//! | [`Topic::Focus`] | One event per focus redraw (high frequency) |
//! | [`Topic::Session`] | Session start / end with metadata |

use gazeos_types::{NavError, NavEvent, NavPayload};
use tokio::sync::broadcast;

/// Default channel capacity (number of buffered events before old ones are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// Routing lanes of the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Navigation,
    Focus,
    Session,
}

impl Topic {
    /// Lane a payload belongs on.
    pub fn of(payload: &NavPayload) -> Self {
        match payload {
            NavPayload::GoBackRequested | NavPayload::CommandFired { .. } => Topic::Navigation,
            NavPayload::FocusMoved { .. } => Topic::Focus,
            NavPayload::SessionStarted(_) | NavPayload::SessionEnded(_) => Topic::Session,
        }
    }
}

/// Shared event bus. Clone it cheaply – all clones share the same underlying
/// broadcast channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    navigation: broadcast::Sender<NavEvent>,
    focus: broadcast::Sender<NavEvent>,
    session: broadcast::Sender<NavEvent>,
}

impl EventBus {
    /// Create a new bus; `capacity` applies to every topic independently.
    pub fn new(capacity: usize) -> Self {
        let (navigation, _) = broadcast::channel(capacity);
        let (focus, _) = broadcast::channel(capacity);
        let (session, _) = broadcast::channel(capacity);
        Self {
            navigation,
            focus,
            session,
        }
    }

    /// Publish `event` to the given [`Topic`] channel.
    ///
    /// Returns the number of active receivers that were handed the event.
    ///
    /// # Errors
    ///
    /// [`NavError::Channel`] when nobody is subscribed to `topic`.
    pub fn publish_to(&self, topic: Topic, event: NavEvent) -> Result<usize, NavError> {
        self.topic_sender(topic)
            .send(event)
            .map_err(|_| NavError::Channel(format!("No subscribers for topic {topic:?}")))
    }

    /// Publish `event` on the lane its payload belongs to.
    pub fn publish(&self, event: NavEvent) -> Result<usize, NavError> {
        self.publish_to(Topic::of(&event.payload), event)
    }

    /// Subscribe to a specific [`Topic`] channel.
    pub fn subscribe_to(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topic_sender(topic).receiver_count()
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<NavEvent> {
        match topic {
            Topic::Navigation => &self.navigation,
            Topic::Focus => &self.focus,
            Topic::Session => &self.session,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Topic-based receiver
// ---------------------------------------------------------------------------

/// An async receiver bound to a single [`Topic`] channel.
///
/// Obtained via [`EventBus::subscribe_to`].
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<NavEvent>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// Returns:
    /// * `Ok(event)` – a successfully received event.
    /// * `Err(broadcast::error::RecvError::Lagged(n))` – the subscriber fell
    ///   behind and `n` messages were dropped.
    /// * `Err(broadcast::error::RecvError::Closed)` – the bus has shut down.
    pub async fn recv(&mut self) -> Result<NavEvent, broadcast::error::RecvError> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`recv`][Self::recv].
    pub fn try_recv(&mut self) -> Result<NavEvent, broadcast::error::TryRecvError> {
        self.receiver.try_recv()
    }

    /// The [`Topic`] this receiver is bound to.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}
