//! Station chat for the Tokyo Metro map.
//!
//! A map of Tokyo Metro stations where each station carries its own local
//! chat history: pick a station, leave a note, and it persists on this
//! machine. This crate holds everything below the map widget: the station
//! catalog, the proximity tiering for markers, and the per-station message
//! store.

pub mod app;
pub mod domain;
pub mod odpt;
pub mod proximity;
pub mod store;
