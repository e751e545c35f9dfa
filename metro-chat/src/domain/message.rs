//! Message and station record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat message posted at a station.
///
/// Messages are immutable once created: they can be deleted but never
/// edited. Ordering within a record is insertion order, which is also
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message body. Non-empty after trimming; the store rejects anything
    /// else before a `Message` is ever constructed.
    pub text: String,
    /// When the message was posted.
    pub posted_at: DateTime<Utc>,
}

impl Message {
    /// Create a message with the current timestamp.
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            posted_at: Utc::now(),
        }
    }
}

/// Persisted state for one station: its railway label and its messages.
///
/// The railway label lives once per record. (The original data shape also
/// carried it on every message; the store accepts that shape on read but
/// never writes it back.) A record exists in the store if and only if it
/// has at least one message remaining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Resolved railway label for this station.
    pub railway: String,
    /// Messages in insertion order.
    pub messages: Vec<Message>,
}

impl StationRecord {
    /// Create a record containing a single message.
    pub fn first(railway: impl Into<String>, message: Message) -> Self {
        Self {
            railway: railway.into(),
            messages: vec![message],
        }
    }
}
