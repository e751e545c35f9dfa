//! The station message store.

use chrono::Utc;
use tracing::debug;

use crate::domain::{Message, StationName, StationRecord};

use super::codec;
use super::error::StoreError;
use super::index::{StationEntry, StationIndex};
use super::provider::StorageProvider;

/// Well-known storage key for the whole dataset.
///
/// Kept identical to the original browser application's localStorage key so
/// existing persisted data remains readable.
pub const STORAGE_KEY: &str = "chatData";

/// Station-scoped message store.
///
/// Holds every station's record in insertion order, together with the
/// derived [`StationIndex`] of stations that currently have messages. Every
/// mutation persists the full mapping through the injected provider before
/// returning.
#[derive(Debug)]
pub struct MessageStore<P: StorageProvider> {
    provider: P,
    records: Vec<(StationName, StationRecord)>,
    index: StationIndex,
}

impl<P: StorageProvider> MessageStore<P> {
    /// Create an empty store, ignoring any previously persisted data.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            records: Vec::new(),
            index: StationIndex::new(),
        }
    }

    /// Load the store from the provider's persisted blob.
    ///
    /// An absent blob yields an empty store. Legacy-shape records (see the
    /// codec module) are upgraded on the fly; a corrupt blob surfaces as
    /// [`StoreError::Persistence`].
    pub fn load(provider: P) -> Result<Self, StoreError> {
        let records = match provider.get(STORAGE_KEY)? {
            Some(blob) => {
                codec::decode(&blob, Utc::now()).map_err(|e| StoreError::Persistence {
                    message: format!("failed to decode stored data: {e}"),
                })?
            }
            None => Vec::new(),
        };

        let mut store = Self {
            provider,
            records,
            index: StationIndex::new(),
        };
        store.rebuild_index();

        debug!(stations = store.records.len(), "loaded message store");
        Ok(store)
    }

    /// Append a message to a station's record, creating the record (and its
    /// index entry) if this is the station's first message.
    ///
    /// Text that is empty after trimming is a silent no-op, not an error.
    /// That mirrors the original application's behaviour and is deliberate.
    /// Each non-empty call appends exactly one message; there is no
    /// deduplication.
    pub fn post_message(
        &mut self,
        station: &StationName,
        railway: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let message = Message::now(text);
        if let Some(pos) = self.position(station) {
            self.records[pos].1.messages.push(message);
        } else {
            self.records
                .push((station.clone(), StationRecord::first(railway, message)));
            self.index.insert(station.clone(), railway);
        }

        debug!(station = %station, "posted message");
        self.persist()
    }

    /// Delete the message at `index` from a station's record.
    ///
    /// Later messages shift down one place; their relative order is
    /// unchanged. Deleting the last remaining message removes the record
    /// and its index entry, exactly as [`Self::delete_all_messages`] would.
    pub fn delete_message(&mut self, station: &StationName, index: usize) -> Result<(), StoreError> {
        let Some(pos) = self.position(station) else {
            return Err(StoreError::NotFound(station.clone()));
        };

        let len = self.records[pos].1.messages.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange {
                station: station.clone(),
                index,
                len,
            });
        }

        self.records[pos].1.messages.remove(index);

        if self.records[pos].1.messages.is_empty() {
            self.records.remove(pos);
            self.index.remove(station);
        }

        debug!(station = %station, index, "deleted message");
        self.persist()
    }

    /// Remove a station's record and index entry entirely.
    ///
    /// Idempotent: deleting a station with no record is a no-op, not an
    /// error.
    pub fn delete_all_messages(&mut self, station: &StationName) -> Result<(), StoreError> {
        if let Some(pos) = self.position(station) {
            self.records.remove(pos);
            self.index.remove(station);
            debug!(station = %station, "deleted all messages");
        }

        self.persist()
    }

    /// The messages for a station, oldest first. Empty when the station has
    /// no record; never an error.
    pub fn messages(&self, station: &StationName) -> &[Message] {
        self.position(station)
            .map(|pos| self.records[pos].1.messages.as_slice())
            .unwrap_or(&[])
    }

    /// The stations that currently have at least one message, in
    /// first-message-first order. The order is deterministic and survives a
    /// persist/load cycle.
    pub fn stations_with_messages(&self) -> &[StationEntry] {
        self.index.entries()
    }

    /// Reconstruct the station index from the records.
    ///
    /// The incremental maintenance in the mutating operations keeps the
    /// index in sync on its own; this exists so the derived view can always
    /// be recovered from the authoritative data.
    pub fn rebuild_index(&mut self) {
        let mut index = StationIndex::new();
        for (station, record) in &self.records {
            index.insert(station.clone(), record.railway.clone());
        }
        self.index = index;
    }

    /// Number of stations with at least one message.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no station has any message.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, station: &StationName) -> Option<usize> {
        self.records.iter().position(|(s, _)| s == station)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let blob = codec::encode(&self.records).map_err(|e| StoreError::Persistence {
            message: format!("failed to encode store: {e}"),
        })?;
        self.provider.set(STORAGE_KEY, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::provider::{MemoryProvider, ProviderError};

    fn station(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn entry_names(store: &MessageStore<impl StorageProvider>) -> Vec<String> {
        store
            .stations_with_messages()
            .iter()
            .map(|e| e.station.as_str().to_string())
            .collect()
    }

    #[test]
    fn post_creates_record_and_index_entry() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let otemachi = station("Otemachi");

        store
            .post_message(&otemachi, "Tokyo Metro Chiyoda Line", "hello")
            .unwrap();

        let entries = store.stations_with_messages();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].station, otemachi);
        assert_eq!(entries[0].railway, "Tokyo Metro Chiyoda Line");

        let messages = store.messages(&otemachi);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "hello");
    }

    #[test]
    fn post_appends_in_order_without_dedup() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let ginza = station("Ginza");

        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "same")
            .unwrap();
        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "same")
            .unwrap();

        assert_eq!(store.messages(&ginza).len(), 2);
        assert_eq!(store.stations_with_messages().len(), 1);
    }

    #[test]
    fn post_trims_text() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let ginza = station("Ginza");

        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "  hello  ")
            .unwrap();

        assert_eq!(store.messages(&ginza)[0].text, "hello");
    }

    #[test]
    fn empty_text_is_silent_noop() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let ginza = station("Ginza");

        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "   ")
            .unwrap();

        assert!(store.is_empty());
        assert!(store.stations_with_messages().is_empty());
    }

    #[test]
    fn delete_message_shifts_later_messages_down() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let otemachi = station("Otemachi");

        store
            .post_message(&otemachi, "Tokyo Metro Chiyoda Line", "first")
            .unwrap();
        store
            .post_message(&otemachi, "Tokyo Metro Chiyoda Line", "second")
            .unwrap();

        store.delete_message(&otemachi, 0).unwrap();

        let messages = store.messages(&otemachi);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "second");
    }

    #[test]
    fn deleting_last_message_removes_station() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let otemachi = station("Otemachi");

        store
            .post_message(&otemachi, "Tokyo Metro Chiyoda Line", "only one")
            .unwrap();
        store.delete_message(&otemachi, 0).unwrap();

        assert!(store.messages(&otemachi).is_empty());
        assert!(store.stations_with_messages().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_message_unknown_station_is_not_found() {
        let mut store = MessageStore::new(MemoryProvider::new());

        let err = store.delete_message(&station("Nowhere"), 0).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn delete_message_bad_index_is_out_of_range() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let ginza = station("Ginza");

        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "hello")
            .unwrap();

        let err = store.delete_message(&ginza, 1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IndexOutOfRange { index: 1, len: 1, .. }
        ));
    }

    #[test]
    fn delete_all_removes_record_and_entry() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let otemachi = station("Otemachi");
        let ginza = station("Ginza");

        store
            .post_message(&otemachi, "Tokyo Metro Chiyoda Line", "a")
            .unwrap();
        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "b")
            .unwrap();

        store.delete_all_messages(&otemachi).unwrap();

        assert!(store.messages(&otemachi).is_empty());
        assert_eq!(entry_names(&store), vec!["Ginza"]);
    }

    #[test]
    fn delete_all_absent_station_is_idempotent() {
        let mut store = MessageStore::new(MemoryProvider::new());
        let ginza = station("Ginza");

        store
            .post_message(&ginza, "Tokyo Metro Ginza Line", "hello")
            .unwrap();

        store.delete_all_messages(&station("Nowhere")).unwrap();
        store.delete_all_messages(&station("Nowhere")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.messages(&ginza).len(), 1);
    }

    #[test]
    fn messages_for_unknown_station_is_empty_not_error() {
        let store = MessageStore::new(MemoryProvider::new());
        assert!(store.messages(&station("Nowhere")).is_empty());
    }

    #[test]
    fn index_order_is_first_message_first() {
        let mut store = MessageStore::new(MemoryProvider::new());

        store
            .post_message(&station("Ueno"), "Tokyo Metro Hibiya Line", "a")
            .unwrap();
        store
            .post_message(&station("Otemachi"), "Tokyo Metro Chiyoda Line", "b")
            .unwrap();
        // A second post to Ueno must not move it.
        store
            .post_message(&station("Ueno"), "Tokyo Metro Hibiya Line", "c")
            .unwrap();

        assert_eq!(entry_names(&store), vec!["Ueno", "Otemachi"]);
    }

    #[test]
    fn load_matches_incrementally_built_index() {
        let mut built = MessageStore::new(MemoryProvider::new());
        for (name, railway, text) in [
            ("Ueno", "Tokyo Metro Hibiya Line", "a"),
            ("Otemachi", "Tokyo Metro Chiyoda Line", "b"),
            ("Ginza", "Tokyo Metro Ginza Line", "c"),
        ] {
            built.post_message(&station(name), railway, text).unwrap();
        }

        // Persist the built store's state, then load it fresh.
        let mut provider = MemoryProvider::new();
        provider
            .set(STORAGE_KEY, &codec::encode(&built.records).unwrap())
            .unwrap();

        let loaded = MessageStore::load(provider).unwrap();
        assert_eq!(
            loaded.stations_with_messages(),
            built.stations_with_messages()
        );
    }

    #[test]
    fn rebuild_index_matches_incremental_index() {
        let mut store = MessageStore::new(MemoryProvider::new());

        store
            .post_message(&station("Ueno"), "Tokyo Metro Hibiya Line", "a")
            .unwrap();
        store
            .post_message(&station("Otemachi"), "Tokyo Metro Chiyoda Line", "b")
            .unwrap();
        store.delete_all_messages(&station("Ueno")).unwrap();

        let incremental = store.index.clone();
        store.rebuild_index();

        assert_eq!(store.index, incremental);
    }

    #[test]
    fn load_empty_provider_gives_empty_store() {
        let store = MessageStore::load(MemoryProvider::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_legacy_data_uses_message_railway_label() {
        let mut provider = MemoryProvider::new();
        provider
            .set(
                STORAGE_KEY,
                r#"{"Otemachi": [{"message": "old note", "timestamp": "2024/5/1 12:00:00", "railwayName": "Tokyo Metro Chiyoda Line"}]}"#,
            )
            .unwrap();

        let store = MessageStore::load(provider).unwrap();

        let entries = store.stations_with_messages();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].railway, "Tokyo Metro Chiyoda Line");
        assert_eq!(store.messages(&station("Otemachi"))[0].text, "old note");
    }

    #[test]
    fn load_corrupt_blob_is_persistence_error() {
        let mut provider = MemoryProvider::new();
        provider.set(STORAGE_KEY, "not json at all").unwrap();

        let err = MessageStore::load(provider).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn persisted_state_survives_reload() {
        use crate::store::provider::FileProvider;

        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = MessageStore::load(FileProvider::new(dir.path())).unwrap();
            store
                .post_message(&station("Ginza"), "Tokyo Metro Ginza Line", "note")
                .unwrap();
            store
                .post_message(&station("Ueno"), "Tokyo Metro Hibiya Line", "other")
                .unwrap();
            store.delete_all_messages(&station("Ueno")).unwrap();
        }

        let reloaded = MessageStore::load(FileProvider::new(dir.path())).unwrap();
        assert_eq!(entry_names(&reloaded), vec!["Ginza"]);
        assert_eq!(reloaded.messages(&station("Ginza"))[0].text, "note");
    }

    /// Provider that accepts reads but fails every write.
    struct ReadOnlyProvider;

    impl StorageProvider for ReadOnlyProvider {
        fn get(&self, _key: &str) -> Result<Option<String>, ProviderError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), ProviderError> {
            Err(ProviderError::Write {
                message: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn write_failure_surfaces_as_persistence_error() {
        let mut store = MessageStore::new(ReadOnlyProvider);

        let err = store
            .post_message(&station("Ginza"), "Tokyo Metro Ginza Line", "hello")
            .unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn empty_text_does_not_touch_the_provider() {
        // A no-op post must not attempt a write; ReadOnlyProvider would fail.
        let mut store = MessageStore::new(ReadOnlyProvider);

        store
            .post_message(&station("Ginza"), "Tokyo Metro Ginza Line", "  ")
            .unwrap();
    }
}
