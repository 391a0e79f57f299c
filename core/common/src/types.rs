//! Common types used throughout drivegate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a Drive folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Create a new FolderId from a string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// - Returns error if the id is empty after trimming
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        let id = id.trim();
        if id.is_empty() {
            return Err(crate::Error::InvalidInput(
                "FolderId cannot be empty".to_string(),
            ));
        }
        Ok(Self(id.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a Drive file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Create a new FileId from a string.
    ///
    /// # Errors
    /// - Returns error if id is empty
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "FileId cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How callers authenticate and which identity talks to Drive.
///
/// Fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AuthMode {
    /// A static service identity; callers present a shared secret.
    #[default]
    #[serde(rename = "SERVICE_ACCOUNT")]
    ServiceAccount,
    /// Callers present their own OAuth bearer token.
    #[serde(rename = "OAUTH")]
    OAuth,
}

impl AuthMode {
    /// Canonical configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::ServiceAccount => "SERVICE_ACCOUNT",
            AuthMode::OAuth => "OAUTH",
        }
    }
}

impl FromStr for AuthMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SERVICE_ACCOUNT" => Ok(AuthMode::ServiceAccount),
            "OAUTH" => Ok(AuthMode::OAuth),
            other => Err(crate::Error::Config(format!(
                "Unknown AUTH_MODE '{}', expected SERVICE_ACCOUNT or OAUTH",
                other
            ))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
