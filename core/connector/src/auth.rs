//! Credential resolution.
//!
//! Turns the configured auth mode plus an inbound request's headers into a
//! credential for the Drive gateway. Nothing here makes a remote call.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use oauth2::AccessToken;

use drivegate_common::{AuthMode, Error, Result};
use drivegate_storage::gdrive::ServiceAccountKey;
use drivegate_storage::Credential;

use crate::config::{ConnectorConfig, SERVICE_ACCOUNT_JSON_VAR};

const BEARER_SCHEME: &str = "bearer";

/// Extract the bearer token from an `Authorization` header.
///
/// The scheme is matched case-insensitively.
///
/// # Errors
/// - `Error::Unauthorized` if the header is missing, not valid text, uses
///   another scheme, or carries an empty token
pub fn bearer_token(headers: &HeaderMap) -> Result<AccessToken> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::Unauthorized("Missing Bearer token".to_string()))?
        .to_str()
        .map_err(|_| Error::Unauthorized("Malformed Authorization header".to_string()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::Unauthorized("Missing Bearer token".to_string()))?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::Unauthorized("Missing Bearer token".to_string()));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Unauthorized("Empty Bearer token".to_string()));
    }

    Ok(AccessToken::new(token.to_string()))
}

/// Resolve the credential for one request.
///
/// In service-account mode the descriptor is parsed from configuration on
/// every call; the caller must already have passed
/// [`authorize_caller`](crate::guard::authorize_caller). In OAuth mode the
/// caller's bearer token becomes the credential.
///
/// # Errors
/// - `Error::Config` if the service account descriptor is absent or malformed
/// - `Error::Unauthorized` if the bearer token is missing or malformed
pub fn resolve_credential(config: &ConnectorConfig, headers: &HeaderMap) -> Result<Credential> {
    match config.auth_mode() {
        AuthMode::ServiceAccount => {
            let json = config.service_account_json().ok_or_else(|| {
                Error::Config(format!(
                    "{} env var is required in SERVICE_ACCOUNT mode",
                    SERVICE_ACCOUNT_JSON_VAR
                ))
            })?;
            Ok(Credential::ServiceAccount(ServiceAccountKey::from_json(json)?))
        }
        AuthMode::OAuth => Ok(Credential::Bearer(bearer_token(headers)?)),
    }
}
