// --- File: crates/commerce_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Request timeout used by payment gateway calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Upper bound on redirects followed for a single call.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `max_redirects` - How many redirects to follow; `0` disables following
pub fn create_client(timeout_secs: u64, max_redirects: usize) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if max_redirects > 0 {
            reqwest::redirect::Policy::limited(max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Client with the default gateway timeout and redirect limit.
pub fn default_client() -> Result<Client, ReqwestError> {
    create_client(DEFAULT_TIMEOUT_SECS, DEFAULT_MAX_REDIRECTS)
}
