/// Sources module
///
/// Where the access token comes from (the PayPal OAuth2 endpoint) and the
/// background task keeping it fresh.
use std::time::Duration;

use reqwest::Client;

pub mod executor;
pub mod oauth2;

/// One shared client; every call made through it is bounded by `timeout_seconds`.
pub fn build_client(timeout_seconds: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
}
