//! Derived index of stations with messages.

use crate::domain::StationName;

/// One station in the index: its name and railway label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationEntry {
    pub station: StationName,
    pub railway: String,
}

/// Insertion-ordered index of the stations that currently have at least one
/// message.
///
/// This is a derived view over the store's records, maintained
/// incrementally on every mutation and rebuildable from scratch. Order is
/// first-message-first: a station appears at the position where its first
/// surviving record was created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationIndex {
    entries: Vec<StationEntry>,
}

impl StationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station to the end of the index. No-op if already present.
    pub fn insert(&mut self, station: StationName, railway: impl Into<String>) {
        if self.contains(&station) {
            return;
        }
        self.entries.push(StationEntry {
            station,
            railway: railway.into(),
        });
    }

    /// Remove a station from the index. No-op if absent.
    pub fn remove(&mut self, station: &StationName) {
        self.entries.retain(|e| &e.station != station);
    }

    /// Whether the station is present.
    pub fn contains(&self, station: &StationName) -> bool {
        self.entries.iter().any(|e| &e.station == station)
    }

    /// The indexed stations, in insertion order.
    pub fn entries(&self) -> &[StationEntry] {
        &self.entries
    }

    /// Number of indexed stations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
