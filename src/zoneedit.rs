//! ZoneEdit dynamic DNS update client.

use reqwest::StatusCode;
use std::time::Duration;

/// ZoneEdit's generic dynamic DNS update endpoint.
pub const UPDATE_URL: &str = "https://api.cp.zoneedit.com/dyn/generic.php";

/// Body substrings ZoneEdit uses to acknowledge an accepted update.
/// The endpoint can report errors with a 200 status, so a success status
/// alone is not enough.
const SUCCESS_MARKERS: [&str; 5] = ["ok", "good", "nochg", "updated", "success"];

/// Result of one update attempt for one host.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// Hostname that was updated.
    pub host: String,
    /// Whether the provider accepted the update.
    pub success: bool,
    /// HTTP status code, 0 on transport failure.
    pub http_status: u16,
    /// Raw response body, or an error description on transport failure.
    pub body: String,
}

/// Client for the ZoneEdit update endpoint.
pub struct ZoneEditClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    token: String,
}

impl ZoneEditClient {
    /// Create a client against the real ZoneEdit endpoint.
    pub fn new(user: String, token: String, timeout: Duration) -> Self {
        Self::with_base_url(user, token, timeout, UPDATE_URL.to_string())
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(user: String, token: String, timeout: Duration, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            user,
            token,
        }
    }

    /// Push `ip` for `host` with a single authenticated GET.
    ///
    /// Never fails at the call boundary: transport errors come back as a
    /// failed result with status 0 so the caller keeps processing the
    /// remaining hosts. Exactly one attempt, no retries.
    pub async fn update(&self, host: &str, ip: &str) -> UpdateResult {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("hostname", host), ("myip", ip)])
            .basic_auth(&self.user, Some(&self.token));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return UpdateResult::transport_failure(host, &e),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return UpdateResult::transport_failure(host, &e),
        };

        UpdateResult {
            host: host.to_string(),
            success: is_accepted(status, &body),
            http_status: status.as_u16(),
            body,
        }
    }
}

impl UpdateResult {
    fn transport_failure(host: &str, e: &reqwest::Error) -> Self {
        Self {
            host: host.to_string(),
            success: false,
            http_status: 0,
            body: format!("request_error: {}", e),
        }
    }
}

/// Classify a provider response.
fn is_accepted(status: StatusCode, body: &str) -> bool {
    let body = body.to_lowercase();
    status.is_success() && SUCCESS_MARKERS.iter().any(|marker| body.contains(marker))
}
