// Shared transport configuration for building reqwest::Client instances.
//
// Keeps timeout and user-agent settings in one place so the client
// constructor stays free of builder boilerplate.

use std::time::Duration;

/// Transport configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("attendly/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}
