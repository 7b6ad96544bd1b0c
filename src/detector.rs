//! Public IP detection.

use crate::error::{DdnsError, Result};
use std::time::Duration;

/// Default IP-echo services, tried in order.
const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://api.ipify.org",
    "https://ipv4.icanhazip.com",
    "https://ifconfig.me/ip",
];

/// IP detector with multiple fallback services.
pub struct IpDetector {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl IpDetector {
    /// Create a new IP detector with the default services.
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoints(
            DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout,
        )
    }

    /// Create a new IP detector with custom services.
    pub fn with_endpoints(endpoints: Vec<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoints }
    }

    /// Detect the public IPv4 address.
    ///
    /// Makes one pass over the fallback services and returns the first
    /// non-empty trimmed response body. A failing or empty service is
    /// skipped; exhausting the list yields an `IpDetection` error. No
    /// retries beyond the single pass.
    pub async fn detect_ipv4(&self) -> Result<String> {
        for endpoint in &self.endpoints {
            match self.try_endpoint(endpoint).await {
                Ok(ip) => {
                    tracing::debug!("Detected IP {} from {}", ip, endpoint);
                    return Ok(ip);
                }
                Err(e) => {
                    tracing::warn!("IP service {} failed: {}", endpoint, e);
                }
            }
        }

        Err(DdnsError::IpDetection(
            "all IP detection services failed".to_string(),
        ))
    }

    /// Try a single IP-echo service.
    async fn try_endpoint(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::IpDetection(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let text = response.text().await?;
        let ip = text.trim();

        if ip.is_empty() {
            return Err(DdnsError::IpDetection(format!("empty response from {}", url)));
        }

        Ok(ip.to_string())
    }
}
