//! Per-request session.
//!
//! A session exists only once the caller has been authorized and a
//! credential resolved; holding one is proof that both steps happened.

use http::HeaderMap;
use std::sync::Arc;

use drivegate_common::Result;
use drivegate_storage::{DriveGateway, GatewayConnector};

use crate::auth::resolve_credential;
use crate::config::ConnectorConfig;
use crate::extract::TextExtractor;
use crate::guard::authorize_caller;

/// Gateway and policy bound to a single request.
pub struct RequestSession {
    config: Arc<ConnectorConfig>,
    gateway: Arc<dyn DriveGateway>,
    extractor: Arc<dyn TextExtractor>,
}

impl RequestSession {
    /// Open a session for one inbound request.
    ///
    /// # Postconditions
    /// - The caller passed the mode-specific authorization check
    /// - The gateway is bound to this request's credential
    ///
    /// # Errors
    /// - `Error::Unauthorized` before any gateway work
    /// - `Error::Config` if the service account descriptor is unusable
    pub fn open(
        config: Arc<ConnectorConfig>,
        connector: &dyn GatewayConnector,
        extractor: Arc<dyn TextExtractor>,
        headers: &HeaderMap,
    ) -> Result<Self> {
        authorize_caller(&config, headers)?;
        let credential = resolve_credential(&config, headers)?;
        let gateway = connector.connect(credential)?;

        Ok(Self {
            config,
            gateway,
            extractor,
        })
    }

    /// Connector configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// The gateway bound to this request.
    pub fn gateway(&self) -> &dyn DriveGateway {
        self.gateway.as_ref()
    }

    /// PDF text extractor.
    pub fn extractor(&self) -> &dyn TextExtractor {
        self.extractor.as_ref()
    }
}
