// ── Runtime service configuration ──
//
// Describes *where* the directory service lives. The TUI builds this from
// its CLI flags/environment and hands it in; core never reads the
// environment itself.

use std::time::Duration;

use url::Url;

use attendly_api::{DirectoryClient, TransportConfig};

use crate::error::CoreError;

/// Configuration for talking to one directory service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base URL (e.g. `http://localhost:8888`).
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the API client this config describes.
    pub fn build_client(&self) -> Result<DirectoryClient, CoreError> {
        let transport = TransportConfig {
            timeout: self.timeout,
        };
        Ok(DirectoryClient::new(&self.base_url, &transport)?)
    }
}
