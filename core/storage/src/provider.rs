//! Drive gateway trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use drivegate_common::{FileId, FolderId, Result};

use crate::credential::Credential;

/// Mimetype of a Google Docs document.
pub const GOOGLE_DOC_MIME_TYPE: &str = "application/vnd.google-apps.document";
/// Mimetype of a PDF file.
pub const PDF_MIME_TYPE: &str = "application/pdf";
/// Export format requested for Google Docs.
pub const TEXT_EXPORT_MIME_TYPE: &str = "text/plain";

/// Owner of a Drive file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Human readable owner name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Owner email (only requested for single-file metadata).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Google Drive file metadata from the API.
///
/// Fetched fresh on every request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID.
    pub id: String,
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Modified time, RFC 3339 text exactly as Drive reported it.
    #[serde(default)]
    pub modified_time: Option<String>,
    /// Parent folder IDs.
    #[serde(default)]
    pub parents: Vec<String>,
    /// File size in bytes as reported by Drive (absent for native documents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// File owners.
    #[serde(default)]
    pub owners: Vec<Owner>,
}

impl DriveFile {
    /// Check whether `folder_id` is one of this file's parents.
    pub fn has_parent(&self, folder_id: &FolderId) -> bool {
        self.parents.iter().any(|p| p == folder_id.as_str())
    }
}

/// Read-only operations offered by the remote storage service.
///
/// Implementations are bound to one credential and live for one request.
/// They perform exactly one attempt per call; retries are not this layer's
/// concern.
#[async_trait]
pub trait DriveGateway: Send + Sync {
    /// Get the gateway name (e.g., "gdrive", "memory").
    fn name(&self) -> &str;

    /// List a single page of files whose parents include `folder_id`.
    async fn list_files(&self, folder_id: &FolderId, page_size: u32) -> Result<Vec<DriveFile>>;

    /// List a single page of files in `folder_id` whose name contains `query`.
    async fn search_files(
        &self,
        folder_id: &FolderId,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<DriveFile>>;

    /// Get metadata for one file.
    ///
    /// # Errors
    /// - File not found
    /// - Network errors
    async fn get_metadata(&self, file_id: &FileId) -> Result<DriveFile>;

    /// Download the raw bytes of a file, fully materialized in memory.
    async fn download(&self, file_id: &FileId) -> Result<Vec<u8>>;

    /// Export a native document as plain text bytes.
    async fn export_text(&self, file_id: &FileId) -> Result<Vec<u8>>;
}

/// Builds a gateway bound to a resolved credential.
///
/// Connecting is local work only; no remote call is made until an operation
/// is invoked on the returned gateway.
pub trait GatewayConnector: Send + Sync {
    /// Bind a gateway to `credential`.
    fn connect(&self, credential: Credential) -> Result<Arc<dyn DriveGateway>>;
}
