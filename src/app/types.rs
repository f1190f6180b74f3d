use std::time::{Duration, Instant};

use crate::view::Payload;

/// How long a status line stays up
pub(super) const STATUS_TTL: Duration = Duration::from_secs(3);

/// Result of a background task, tagged with the view generation it was
/// issued under. Messages from an older generation are dropped.
#[derive(Debug)]
pub struct Message {
    pub generation: u64,
    pub payload: Payload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageType {
    Info,
    Error,
}

/// Transient line shown in the status bar
#[derive(Debug, Clone)]
pub(super) struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub timestamp: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message_type: MessageType::Info,
            timestamp: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message_type: MessageType::Error,
            timestamp: Instant::now(),
        }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) > STATUS_TTL
    }
}
