//! Catalog loading and materialisation.

use tracing::{debug, warn};

use crate::domain::{Coordinate, Station, StationName};

use super::cache::CatalogCache;
use super::client::{OdptClient, StationDto, TOKYO_METRO};
use super::error::OdptError;
use super::railway::RailwayNames;

/// Load the Tokyo Metro station catalog, cache-first.
///
/// A valid cached catalog is used as-is; otherwise the catalog is fetched
/// from the API and written back to the cache. A cache write failure does
/// not fail the load, since the fetched data is already in hand.
pub async fn load_catalog(
    client: &OdptClient,
    cache: &CatalogCache,
    names: &RailwayNames,
) -> Result<Vec<Station>, OdptError> {
    let dtos = match cache.load() {
        Some(dtos) => {
            debug!(count = dtos.len(), "using cached station catalog");
            dtos
        }
        None => {
            let dtos = client.fetch_stations(TOKYO_METRO).await?;
            if let Err(e) = cache.save(&dtos) {
                warn!("failed to cache station catalog: {e}");
            }
            dtos
        }
    };

    Ok(build_catalog(dtos, names))
}

/// Turn raw station DTOs into catalog entries.
///
/// Entries without a usable name or position are dropped; the map cannot
/// place them and the store cannot key them.
pub fn build_catalog(dtos: Vec<StationDto>, names: &RailwayNames) -> Vec<Station> {
    dtos.into_iter()
        .filter_map(|dto| {
            let name = dto.display_name().and_then(|n| StationName::parse(n).ok())?;
            let (Some(lat), Some(lng)) = (dto.lat, dto.lng) else {
                return None;
            };

            let railway_code = dto.railway_code().to_string();
            let railway = names.resolve(&railway_code);

            Some(Station {
                name,
                coordinate: Coordinate::new(lat, lng),
                railway_code,
                railway,
            })
        })
        .collect()
}
