//! Subscription gate checked before anything else runs.
//!
//! Only an explicit answer from the endpoint can stop the run. Timeouts and
//! transport failures let the run continue.

use reqwest::Client;
use setup_applanga_core::{Error, Result, Settings};
use tracing::{debug, info};

use crate::http::{DEFAULT_USER_AGENT, build_client};

/// Message shown when the subscription is rejected.
pub const REJECTION_MESSAGE: &str =
    "Subscription is not valid. Reach out to support@stepsecurity.io";

/// Outcome of a subscription check that does not abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// The endpoint confirmed the subscription.
    Valid,
    /// The endpoint timed out or could not be reached.
    Unreachable,
}

/// Client for the subscription endpoint.
#[derive(Debug, Clone)]
pub struct SubscriptionGate {
    client: Client,
    url: String,
}

impl SubscriptionGate {
    /// Create a gate for `repository` (`owner/name`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings, repository: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(DEFAULT_USER_AGENT, settings.subscription_timeout)?,
            url: settings.subscription_url(repository),
        })
    }

    /// The subscription check URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check the subscription.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubscriptionRejected`] when the endpoint answers with a
    /// non-success status.
    pub async fn check(&self) -> Result<SubscriptionStatus> {
        debug!(url = %self.url, "Checking subscription");

        match self.client.get(&self.url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Subscription is valid");
                Ok(SubscriptionStatus::Valid)
            }
            Ok(response) => Err(Error::SubscriptionRejected {
                status: response.status().as_u16(),
            }),
            Err(e) => {
                debug!(error = %e, "Subscription check failed without a response");
                info!("Timeout or API not reachable. Continuing to next step.");
                Ok(SubscriptionStatus::Unreachable)
            }
        }
    }
}
