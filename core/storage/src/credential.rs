//! Per-request credential for the Drive gateway.

use oauth2::AccessToken;
use reqwest::Client;
use std::sync::Arc;

use crate::gdrive::auth::{BearerToken, ServiceAccountAuth, ServiceAccountKey, TokenSource};

/// Credential bound to a single request.
///
/// Never persisted; dropped with the request that resolved it.
#[derive(Debug)]
pub enum Credential {
    /// Static service identity from process configuration.
    ServiceAccount(ServiceAccountKey),
    /// Caller-supplied OAuth bearer token.
    Bearer(AccessToken),
}

impl Credential {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::ServiceAccount(_) => "service_account",
            Credential::Bearer(_) => "bearer",
        }
    }

    /// Turn the credential into a token source sharing `http`'s pool.
    pub fn into_token_source(self, http: Client) -> Arc<dyn TokenSource> {
        match self {
            Credential::ServiceAccount(key) => Arc::new(ServiceAccountAuth::new(key, http)),
            Credential::Bearer(token) => Arc::new(BearerToken::new(token)),
        }
    }
}
