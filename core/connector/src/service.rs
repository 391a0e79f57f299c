//! Connector service: the process-wide entry point for request handling.

use http::HeaderMap;
use std::sync::Arc;

use drivegate_common::{AuthMode, Result};
use drivegate_storage::gdrive::DriveConnector;
use drivegate_storage::GatewayConnector;

use crate::config::ConnectorConfig;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::session::RequestSession;

/// Immutable state shared by all requests.
///
/// Holds no per-request data and no caches, so it is safe to share across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct DriveService {
    config: Arc<ConnectorConfig>,
    connector: Arc<dyn GatewayConnector>,
    extractor: Arc<dyn TextExtractor>,
}

impl DriveService {
    /// Create a service from its collaborators.
    pub fn new(
        config: ConnectorConfig,
        connector: Arc<dyn GatewayConnector>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            connector,
            extractor,
        }
    }

    /// Create a service talking to Google Drive with `pdf-extract`.
    ///
    /// # Errors
    /// - HTTP client construction failed
    pub fn google(config: ConnectorConfig) -> Result<Self> {
        Ok(Self::new(
            config,
            Arc::new(DriveConnector::new()?),
            Arc::new(PdfTextExtractor),
        ))
    }

    /// Connector configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Configured auth mode.
    pub fn auth_mode(&self) -> AuthMode {
        self.config.auth_mode()
    }

    /// Authorize the caller and bind a gateway for one request.
    pub fn open_session(&self, headers: &HeaderMap) -> Result<RequestSession> {
        RequestSession::open(
            self.config.clone(),
            self.connector.as_ref(),
            self.extractor.clone(),
            headers,
        )
    }
}
