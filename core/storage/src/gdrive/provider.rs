//! Google Drive gateway connector.

use reqwest::Client;
use std::sync::Arc;

use drivegate_common::{Error, Result};

use super::client::{DriveClient, DRIVE_API_BASE};
use crate::credential::Credential;
use crate::provider::{DriveGateway, GatewayConnector};

/// Builds [`DriveClient`]s for resolved credentials.
///
/// Holds the process-wide HTTP connection pool; every connected client shares
/// it, while the credential stays private to the request.
pub struct DriveConnector {
    http: Client,
    base_url: String,
}

impl DriveConnector {
    /// Create a connector for the public Drive API.
    ///
    /// # Errors
    /// - HTTP client construction failed (TLS backend unavailable)
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("drivegate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(http, DRIVE_API_BASE))
    }

    /// Create a connector from an existing client and API root.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl GatewayConnector for DriveConnector {
    fn connect(&self, credential: Credential) -> Result<Arc<dyn DriveGateway>> {
        tracing::debug!(credential = credential.kind(), "Connecting Drive client");
        let tokens = credential.into_token_source(self.http.clone());
        Ok(Arc::new(DriveClient::with_base_url(
            self.http.clone(),
            tokens,
            self.base_url.clone(),
        )))
    }
}
