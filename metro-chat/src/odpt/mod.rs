//! ODPT station catalog client.
//!
//! Fetches the Tokyo Metro station catalog from the ODPT (Open Data for
//! Public Transportation) API, resolves railway codes to human-readable
//! line names, and caches the catalog on disk so the application does not
//! hit the API on every start.

mod cache;
mod catalog;
mod client;
mod error;
mod railway;

pub use cache::{CatalogCache, CatalogCacheConfig};
pub use catalog::{build_catalog, load_catalog};
pub use client::{OdptClient, OdptClientConfig, StationDto, StationTitle, TOKYO_METRO};
pub use error::OdptError;
pub use railway::{RailwayNames, tokyo_metro_names};
