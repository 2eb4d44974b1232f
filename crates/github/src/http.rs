//! HTTP client construction shared by every endpoint.

use reqwest::Client;
use setup_applanga_core::{Error, Result};
use std::time::Duration;

/// User agent for requests that are not pinned to a specific value.
pub const DEFAULT_USER_AGENT: &str = concat!("setup-applanga/", env!("CARGO_PKG_VERSION"));

/// Build a client with a user agent and a whole-request timeout.
///
/// # Errors
///
/// Returns [`Error::Config`] if the TLS backend cannot be initialised.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))
}

/// Human-readable description of a transport failure.
pub(crate) fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("endpoint unreachable: {err}")
    } else {
        err.to_string()
    }
}
