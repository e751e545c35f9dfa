//! Domain types for the station chat map.
//!
//! This module contains the core model types shared by the message store,
//! the proximity classifier and the catalog layer. Identifier types enforce
//! their invariants at construction time, so code that receives them can
//! trust their validity.

mod coordinate;
mod message;
mod station;

pub use coordinate::Coordinate;
pub use message::{Message, StationRecord};
pub use station::{InvalidStationName, Station, StationName, UNKNOWN_RAILWAY};
