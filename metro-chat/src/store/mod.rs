//! Station-scoped message store.
//!
//! Owns the persisted mapping from station name to its message list and
//! railway label, plus the derived index of stations that currently have at
//! least one message. Persistence goes through an injected
//! [`StorageProvider`]; the whole mapping is (de)serialized as one unit on
//! every read and write.
//!
//! The store assumes it is the sole writer of its storage key. Two
//! processes mutating the same key race without protection; that is a known
//! limitation, not a supported mode.

mod codec;
mod error;
mod index;
mod message_store;
mod provider;

pub use error::StoreError;
pub use index::{StationEntry, StationIndex};
pub use message_store::{MessageStore, STORAGE_KEY};
pub use provider::{FileProvider, MemoryProvider, ProviderError, StorageProvider};
