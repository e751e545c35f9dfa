//! Serialization of the persisted station mapping.
//!
//! The blob is one JSON object keyed by station name. The current record
//! shape is `{ "railway": ..., "messages": [...] }`; old browser data
//! instead stored a bare array of messages, each carrying its own
//! `railwayName` and a locale-formatted `timestamp`. Decoding accepts both
//! shapes; encoding always writes the current one.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::domain::{Message, StationName, StationRecord, UNKNOWN_RAILWAY};

/// A record as it may appear in persisted data.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedRecord {
    /// Current shape: record-level railway label.
    Current(StationRecord),
    /// Legacy shape: a bare message array with per-message labels.
    Legacy(Vec<LegacyMessage>),
}

/// Message shape written by the original browser application.
#[derive(Deserialize)]
struct LegacyMessage {
    message: String,
    /// Locale-formatted string; usually not machine-parseable.
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default, rename = "railwayName")]
    railway_name: Option<String>,
}

/// Encode the records as one JSON object, preserving record order.
pub fn encode(records: &[(StationName, StationRecord)]) -> Result<String, serde_json::Error> {
    let mut map = serde_json::Map::new();
    for (name, record) in records {
        map.insert(name.as_str().to_string(), serde_json::to_value(record)?);
    }
    serde_json::to_string(&serde_json::Value::Object(map))
}

/// Decode a persisted blob into records, preserving document order.
///
/// Legacy records take their railway label from the first message's
/// `railwayName`, falling back to [`UNKNOWN_RAILWAY`]. Legacy timestamps
/// that cannot be parsed become `loaded_at`. Stations with an unusable name
/// or no remaining messages are dropped: a record exists iff it has at
/// least one message.
pub fn decode(
    blob: &str,
    loaded_at: DateTime<Utc>,
) -> Result<Vec<(StationName, StationRecord)>, serde_json::Error> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(blob)?;

    let mut records = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Ok(station) = StationName::parse(&name) else {
            warn!(name = %name, "dropping persisted record with unusable station name");
            continue;
        };

        let record = match serde_json::from_value::<PersistedRecord>(value)? {
            PersistedRecord::Current(record) => record,
            PersistedRecord::Legacy(messages) => upgrade_legacy(messages, loaded_at),
        };

        if record.messages.is_empty() {
            continue;
        }

        records.push((station, record));
    }

    Ok(records)
}

/// Convert a legacy message array into a current-shape record.
fn upgrade_legacy(messages: Vec<LegacyMessage>, loaded_at: DateTime<Utc>) -> StationRecord {
    let railway = messages
        .first()
        .and_then(|m| m.railway_name.clone())
        .unwrap_or_else(|| UNKNOWN_RAILWAY.to_string());

    let messages = messages
        .into_iter()
        .map(|m| Message {
            text: m.message,
            posted_at: m
                .timestamp
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or(loaded_at),
        })
        .collect();

    StationRecord { railway, messages }
}
