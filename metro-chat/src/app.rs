//! Application state.
//!
//! The original browser app kept the selected station, the marker map and
//! the chat-station list as module-level globals. Here they live in one
//! explicit controller object that the UI layer drives: select a station,
//! post to the selection, ask for a station's view. All calls are plain
//! synchronous sequences; there is no readiness coordination.

use std::collections::HashMap;

use crate::domain::{Coordinate, Message, Station, StationName, UNKNOWN_RAILWAY};
use crate::proximity::{Tier, distance_km};
use crate::store::{MessageStore, StationEntry, StorageProvider, StoreError};

/// Everything needed to render one station's chat panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StationView<'a> {
    pub station: StationName,
    pub railway: String,
    pub messages: &'a [Message],
}

/// Application state: the message store, the station catalog, and the
/// current selection.
pub struct AppState<P: StorageProvider> {
    store: MessageStore<P>,
    catalog: HashMap<StationName, Station>,
    selected: Option<StationName>,
}

impl<P: StorageProvider> AppState<P> {
    /// Create state around a store, with an empty catalog and no selection.
    pub fn new(store: MessageStore<P>) -> Self {
        Self {
            store,
            catalog: HashMap::new(),
            selected: None,
        }
    }

    /// Replace the catalog with freshly loaded stations.
    pub fn load_catalog(&mut self, stations: Vec<Station>) {
        self.catalog = stations.into_iter().map(|s| (s.name.clone(), s)).collect();
    }

    /// Number of catalog stations.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Pair every catalog station with its proximity tier relative to the
    /// user's position, sorted by station name for a deterministic order.
    pub fn classified(&self, user: Coordinate) -> Vec<(&Station, Tier)> {
        let mut stations: Vec<_> = self
            .catalog
            .values()
            .map(|s| (s, Tier::classify(distance_km(user, s.coordinate))))
            .collect();
        stations.sort_by(|(a, _), (b, _)| a.name.as_str().cmp(b.name.as_str()));
        stations
    }

    /// Mark a station as selected (a marker was clicked).
    pub fn select(&mut self, station: StationName) {
        self.selected = Some(station);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The currently selected station, if any.
    pub fn selected(&self) -> Option<&StationName> {
        self.selected.as_ref()
    }

    /// Post a message to the currently selected station.
    ///
    /// With no selection this is a silent no-op, matching the original
    /// application. The railway label comes from the catalog, falling back
    /// to the unknown-railway sentinel for stations the catalog does not
    /// know.
    pub fn post_to_selected(&mut self, text: &str) -> Result<(), StoreError> {
        let Some(station) = self.selected.clone() else {
            return Ok(());
        };

        let railway = self.railway_for(&station);
        self.store.post_message(&station, &railway, text)
    }

    /// The view for one station: its railway label and message history.
    pub fn station_view(&self, station: &StationName) -> StationView<'_> {
        StationView {
            station: station.clone(),
            railway: self.railway_for(station),
            messages: self.store.messages(station),
        }
    }

    /// The stations that currently have messages, for the sidebar list.
    pub fn stations_with_messages(&self) -> &[StationEntry] {
        self.store.stations_with_messages()
    }

    /// Delete one message from a station.
    pub fn delete_message(&mut self, station: &StationName, index: usize) -> Result<(), StoreError> {
        self.store.delete_message(station, index)
    }

    /// Delete a station's whole message history.
    pub fn delete_all_messages(&mut self, station: &StationName) -> Result<(), StoreError> {
        self.store.delete_all_messages(station)
    }

    fn railway_for(&self, station: &StationName) -> String {
        if let Some(entry) = self.catalog.get(station) {
            return entry.railway.clone();
        }

        // Not in the catalog; fall back to what the store remembers.
        self.store
            .stations_with_messages()
            .iter()
            .find(|e| &e.station == station)
            .map(|e| e.railway.clone())
            .unwrap_or_else(|| UNKNOWN_RAILWAY.to_string())
    }
}
