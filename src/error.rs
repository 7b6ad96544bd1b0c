//! Error types for zoneedit-ddns.

use thiserror::Error;

/// Result type alias for zoneedit-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error (missing credentials, hosts, or IP).
    #[error("Configuration error: {0}")]
    Config(String),

    /// IP detection error.
    #[error("IP detection failed: {0}")]
    IpDetection(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}
