//! Message store error types.

use crate::domain::StationName;

use super::provider::ProviderError;

/// Errors raised by message store operations.
///
/// All variants are recoverable by the caller; none are fatal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The operation referenced a station with no record.
    #[error("no messages recorded for station {0}")]
    NotFound(StationName),

    /// A delete referenced a message index outside the station's list.
    #[error("message index {index} out of range for {station} ({len} messages)")]
    IndexOutOfRange {
        station: StationName,
        index: usize,
        len: usize,
    },

    /// The storage provider could not complete a read or write, or the
    /// stored blob could not be (de)serialized.
    #[error("persistence failure: {message}")]
    Persistence { message: String },
}

impl From<ProviderError> for StoreError {
    fn from(e: ProviderError) -> Self {
        StoreError::Persistence {
            message: e.to_string(),
        }
    }
}
