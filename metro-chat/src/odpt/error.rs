//! ODPT API error types.

/// Errors that can occur when fetching the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum OdptError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the consumer key
    #[error("unauthorized: check ODPT_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Catalog cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
