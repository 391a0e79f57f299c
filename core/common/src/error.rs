//! Common error types for drivegate.

use thiserror::Error;

/// Top-level error type for drivegate operations.
///
/// Every variant maps to exactly one failure class of the HTTP surface;
/// nothing in the workspace retries or swallows these.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is absent or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller did not present a valid shared secret or bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File lies outside the allowed folder.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Mimetype has no text extraction strategy.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote service rejected the credential.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Remote storage call failed.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Text extraction failed.
    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl Error {
    /// Short machine-readable code for structured error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Unauthorized(_) => "unauthorized",
            Error::Forbidden(_) => "forbidden",
            Error::UnsupportedMediaType(_) => "unsupported_media_type",
            Error::InvalidInput(_) => "invalid_input",
            Error::NotFound(_) => "not_found",
            Error::Authentication(_) => "authentication_error",
            Error::Gateway(_) => "gateway_error",
            Error::Extraction(_) => "extraction_error",
        }
    }

    /// Whether the failure originates on the server side rather than
    /// with the caller's request.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::Authentication(_)
                | Error::Gateway(_)
                | Error::Extraction(_)
        )
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
