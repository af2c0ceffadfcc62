//! Push notifications from the capture host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default buffer depth for the host event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Sender half of the host event channel.
pub type EventSender = tokio::sync::broadcast::Sender<HostEvent>;

/// Receiver half of the host event channel.
///
/// Broadcast semantics match the host contract: every active subscriber
/// sees every event, delivery is at-least-once for the lifetime of a
/// subscription, and a lagging subscriber observes a `Lagged` error rather
/// than blocking the host.
pub type EventReceiver = tokio::sync::broadcast::Receiver<HostEvent>;

/// Create the host event channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY)
}

/// The topics the host publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventTopic {
    CaptureTaken,
    RecordingStarted,
    RecordingStopped,
}

impl EventTopic {
    /// Wire name of the topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaptureTaken => "capture-taken",
            Self::RecordingStarted => "recording-started",
            Self::RecordingStopped => "recording-stopped",
        }
    }
}

impl std::fmt::Display for EventTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One push notification from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "payload", rename_all = "kebab-case")]
pub enum HostEvent {
    /// One still frame was written; payload is the artifact path.
    CaptureTaken(PathBuf),

    /// The host confirmed that video recording is live.
    RecordingStarted,

    /// The host confirmed that video recording has ended.
    RecordingStopped,
}

impl HostEvent {
    /// Topic this event was published on.
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CaptureTaken(_) => EventTopic::CaptureTaken,
            Self::RecordingStarted => EventTopic::RecordingStarted,
            Self::RecordingStopped => EventTopic::RecordingStopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_with_wire_topic_names() {
        let json = serde_json::to_string(&HostEvent::CaptureTaken(PathBuf::from("/a/1.webp")))
            .unwrap();
        assert!(json.contains("\"capture-taken\""));

        let json = serde_json::to_string(&HostEvent::RecordingStarted).unwrap();
        assert!(json.contains("\"recording-started\""));
    }

    #[test]
    fn event_topic_round_trips() {
        for event in [
            HostEvent::CaptureTaken(PathBuf::from("/a/1.webp")),
            HostEvent::RecordingStarted,
            HostEvent::RecordingStopped,
        ] {
            let json = serde_json::to_string(&event).unwrap();
            let parsed: HostEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.topic(), event.topic());
        }
    }
}
