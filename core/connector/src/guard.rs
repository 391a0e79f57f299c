//! Authorization guard.
//!
//! Two independent checks: whether the caller may use the connector at all,
//! and whether a given file lies inside the allowed folder. Both are
//! re-evaluated on every request.

use http::HeaderMap;
use subtle::ConstantTimeEq;

use drivegate_common::{AuthMode, Error, Result};
use drivegate_storage::DriveFile;

use crate::config::ConnectorConfig;

/// Header carrying the shared secret in service-account mode.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check that the caller may invoke an operation.
///
/// Service-account mode requires `x-api-key` to equal the configured secret;
/// an unconfigured secret rejects everyone. OAuth mode has nothing to check
/// here: the bearer token is the caller credential and Drive validates it.
///
/// Must run before any gateway call.
///
/// # Errors
/// - `Error::Unauthorized` on a missing, unreadable or wrong key
pub fn authorize_caller(config: &ConnectorConfig, headers: &HeaderMap) -> Result<()> {
    if config.auth_mode() != AuthMode::ServiceAccount {
        return Ok(());
    }

    let presented = headers
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    let authorized = match config.api_key() {
        Some(expected) => {
            !presented.is_empty() && bool::from(presented.ct_eq(expected.as_bytes()))
        }
        None => false,
    };

    if authorized {
        Ok(())
    } else {
        tracing::debug!("Rejected request with invalid or missing {}", API_KEY_HEADER);
        Err(Error::Unauthorized(format!("Invalid or missing {}", API_KEY_HEADER)))
    }
}

/// Check that `file` is a direct child of the allowed folder.
///
/// Must run after the metadata fetch and before any content fetch.
///
/// # Errors
/// - `Error::Forbidden` if the allowed folder is not among the parents
pub fn ensure_in_allowed_folder(config: &ConnectorConfig, file: &DriveFile) -> Result<()> {
    if file.has_parent(config.allowed_folder_id()) {
        Ok(())
    } else {
        tracing::warn!(file_id = %file.id, "Rejected file outside the allowed folder");
        Err(Error::Forbidden("File not in allowed folder".to_string()))
    }
}
