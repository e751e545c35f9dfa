//! HTTP client for the ODPT station endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::OdptError;

/// Default base URL for the ODPT API.
const DEFAULT_BASE_URL: &str = "https://api.odpt.org/api/v4";

/// Operator code for Tokyo Metro, the operator the original application
/// queries.
pub const TOKYO_METRO: &str = "TokyoMetro";

/// Multilingual station title as returned by ODPT.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationTitle {
    /// Japanese name.
    pub ja: Option<String>,
    /// English name, not always present.
    pub en: Option<String>,
}

/// One station as returned by the ODPT `odpt:Station` endpoint.
///
/// Only the fields the application needs; the API returns many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDto {
    #[serde(rename = "geo:lat")]
    pub lat: Option<f64>,
    #[serde(rename = "geo:long")]
    pub lng: Option<f64>,
    #[serde(default, rename = "odpt:stationTitle")]
    pub title: StationTitle,
    /// Full railway identifier, e.g. `odpt.Railway:TokyoMetro.Chiyoda`.
    #[serde(default, rename = "odpt:railway")]
    pub railway: String,
}

impl StationDto {
    /// The display name: Japanese, falling back to English.
    pub fn display_name(&self) -> Option<&str> {
        self.title
            .ja
            .as_deref()
            .or(self.title.en.as_deref())
    }

    /// The railway code with its `odpt.Railway:` prefix stripped, e.g.
    /// `TokyoMetro.Chiyoda`.
    pub fn railway_code(&self) -> &str {
        self.railway
            .split_once(':')
            .map(|(_, code)| code)
            .unwrap_or(&self.railway)
    }
}

/// Configuration for the ODPT client.
#[derive(Debug, Clone)]
pub struct OdptClientConfig {
    /// Consumer key, sent as the `acl:consumerKey` query parameter.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OdptClientConfig {
    /// Create a new config with the given consumer key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the ODPT API.
#[derive(Debug, Clone)]
pub struct OdptClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OdptClient {
    /// Create a new ODPT client.
    pub fn new(config: OdptClientConfig) -> Result<Self, OdptError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch every station of the given operator (e.g. [`TOKYO_METRO`]).
    pub async fn fetch_stations(&self, operator: &str) -> Result<Vec<StationDto>, OdptError> {
        let url = format!("{}/odpt:Station", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("odpt:operator", format!("odpt.Operator:{operator}")),
                ("acl:consumerKey", self.api_key.clone()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(OdptError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OdptError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let stations: Vec<StationDto> =
            serde_json::from_str(&body).map_err(|e| OdptError::Json {
                message: e.to_string(),
            })?;

        debug!(operator, count = stations.len(), "fetched station catalog");
        Ok(stations)
    }
}
