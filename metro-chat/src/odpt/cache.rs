//! Disk cache for the fetched station catalog.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::client::StationDto;
use super::error::OdptError;

/// Default cache TTL: 24 hours. The catalog changes rarely.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// On-disk cache payload.
#[derive(Debug, Serialize, Deserialize)]
struct CachedCatalog {
    /// Unix timestamp when the catalog was fetched.
    fetched_at_secs: u64,
    stations: Vec<StationDto>,
}

/// Configuration for the catalog disk cache.
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long a cached catalog remains valid.
    pub ttl: Duration,
}

impl CatalogCacheConfig {
    /// Create a new cache config with the given path and the default TTL.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self::new("station_catalog.json")
    }
}

/// Disk cache for the station catalog.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    config: CatalogCacheConfig,
}

impl CatalogCache {
    /// Create a catalog cache with the given config.
    pub fn new(config: CatalogCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load the catalog from disk.
    ///
    /// A missing, unreadable, corrupt, or expired cache file all read as a
    /// miss (`None`); the caller falls back to fetching.
    pub fn load(&self) -> Option<Vec<StationDto>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedCatalog = serde_json::from_str(&contents).ok()?;

        if self.is_expired(cached.fetched_at_secs) {
            return None;
        }

        Some(cached.stations)
    }

    /// Save a freshly fetched catalog, creating parent directories if
    /// needed.
    pub fn save(&self, stations: &[StationDto]) -> Result<(), OdptError> {
        let fetched_at_secs = unix_now().ok_or_else(|| OdptError::Cache {
            message: "system time before unix epoch".to_string(),
        })?;

        let cached = CachedCatalog {
            fetched_at_secs,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| OdptError::Cache {
                message: format!("failed to create cache directory: {e}"),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| OdptError::Cache {
            message: format!("failed to serialize catalog: {e}"),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| OdptError::Cache {
            message: format!("failed to write cache file: {e}"),
        })
    }

    /// The cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn is_expired(&self, fetched_at_secs: u64) -> bool {
        let Some(now) = unix_now() else {
            return true;
        };
        now.saturating_sub(fetched_at_secs) >= self.config.ttl.as_secs()
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
