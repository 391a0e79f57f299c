//! Process configuration for the connector.
//!
//! Loaded once at startup, validated, and shared read-only by every request.

use std::fmt;

use drivegate_common::{AuthMode, Error, FolderId, Result};

/// Environment variable selecting the auth mode.
pub const AUTH_MODE_VAR: &str = "AUTH_MODE";
/// Environment variable holding the allowed folder id.
pub const ALLOWED_FOLDER_ID_VAR: &str = "ALLOWED_FOLDER_ID";
/// Environment variable holding the shared secret for service-account mode.
pub const API_KEY_VAR: &str = "API_KEY_FOR_GPT";
/// Environment variable holding the service account JSON descriptor.
pub const SERVICE_ACCOUNT_JSON_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

/// Validated connector configuration.
#[derive(Clone)]
pub struct ConnectorConfig {
    auth_mode: AuthMode,
    allowed_folder_id: FolderId,
    api_key: Option<String>,
    service_account_json: Option<String>,
}

impl ConnectorConfig {
    /// Create a configuration with no secrets set.
    pub fn new(auth_mode: AuthMode, allowed_folder_id: FolderId) -> Self {
        Self {
            auth_mode,
            allowed_folder_id,
            api_key: None,
            service_account_json: None,
        }
    }

    /// Set the shared secret callers must present in service-account mode.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_blank(api_key.into());
        self
    }

    /// Set the service account JSON descriptor.
    pub fn with_service_account_json(mut self, json: impl Into<String>) -> Self {
        self.service_account_json = non_blank(json.into());
        self
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// - `ALLOWED_FOLDER_ID` missing or blank
    /// - `AUTH_MODE` set to an unknown value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `ALLOWED_FOLDER_ID` is required. `AUTH_MODE` defaults to
    /// `SERVICE_ACCOUNT`. The service-account secrets are optional here and
    /// checked per request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_folder_id = lookup(ALLOWED_FOLDER_ID_VAR)
            .and_then(non_blank)
            .ok_or_else(|| {
                Error::Config(format!("{} env var is required", ALLOWED_FOLDER_ID_VAR))
            })?;
        let allowed_folder_id = FolderId::new(allowed_folder_id)?;

        let auth_mode = match lookup(AUTH_MODE_VAR).and_then(non_blank) {
            Some(mode) => mode.parse()?,
            None => AuthMode::default(),
        };

        let mut config = Self::new(auth_mode, allowed_folder_id);
        config.api_key = lookup(API_KEY_VAR).and_then(non_blank);
        config.service_account_json = lookup(SERVICE_ACCOUNT_JSON_VAR).and_then(non_blank);
        Ok(config)
    }

    /// Configured auth mode.
    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// The only folder whose files may be read.
    pub fn allowed_folder_id(&self) -> &FolderId {
        &self.allowed_folder_id
    }

    /// Shared secret, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Service account descriptor, if configured.
    pub fn service_account_json(&self) -> Option<&str> {
        self.service_account_json.as_deref()
    }

    /// Problems that do not stop startup but will fail every request.
    pub fn startup_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth_mode == AuthMode::ServiceAccount {
            if self.api_key.is_none() {
                warnings.push(format!(
                    "{} is not set; every request will be rejected as unauthorized",
                    API_KEY_VAR
                ));
            }
            if self.service_account_json.is_none() {
                warnings.push(format!(
                    "{} is not set; Drive requests will fail",
                    SERVICE_ACCOUNT_JSON_VAR
                ));
            }
        }
        warnings
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("auth_mode", &self.auth_mode)
            .field("allowed_folder_id", &self.allowed_folder_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "service_account_json",
                &self.service_account_json.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
