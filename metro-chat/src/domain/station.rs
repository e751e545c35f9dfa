//! Station identifier and catalog entry types.

use std::fmt;

use super::Coordinate;

/// Railway label used for records whose line can no longer be determined
/// (old persisted data that predates the record-level label).
pub const UNKNOWN_RAILWAY: &str = "unknown railway";

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// A station identifier.
///
/// The persisted data is keyed by the station's display name, so that name
/// doubles as the primary key. Two stations sharing a display name would
/// collide; this type is the single boundary a switch to a stable station
/// code would have to touch.
///
/// A `StationName` is guaranteed non-empty and free of leading or trailing
/// whitespace by construction.
///
/// # Examples
///
/// ```
/// use metro_chat::domain::StationName;
///
/// let otemachi = StationName::parse("Otemachi").unwrap();
/// assert_eq!(otemachi.as_str(), "Otemachi");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationName::parse("  Ginza ").unwrap().as_str(), "Ginza");
///
/// // Whitespace-only input is rejected
/// assert!(StationName::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StationName(String);

impl StationName {
    /// Parse a station name from a string.
    ///
    /// The input is trimmed; it must be non-empty after trimming.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationName {
                reason: "must be non-empty after trimming",
            });
        }

        Ok(StationName(trimmed.to_string()))
    }

    /// Returns the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the station catalog, as handed to the application layer
/// after the railway code has been resolved to a human-readable label.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Display name, doubling as the store key.
    pub name: StationName,
    /// Geographic position of the station.
    pub coordinate: Coordinate,
    /// Raw railway code, e.g. `TokyoMetro.Chiyoda`.
    pub railway_code: String,
    /// Resolved railway label, e.g. `Tokyo Metro Chiyoda Line`.
    pub railway: String,
}
