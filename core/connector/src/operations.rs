//! Read-only Drive operations exposed to callers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use drivegate_common::{Error, FileId, FolderId, Result};
use drivegate_storage::DriveFile;

use crate::extract::{decode_export, unsupported, ExtractionStrategy};
use crate::guard::ensure_in_allowed_folder;
use crate::session::RequestSession;

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Text extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub file_id: String,
    pub name: String,
    pub mime_type: String,
    pub text: String,
}

/// Drive operations handler.
///
/// Provides folder-scoped reads using an open session.
pub struct DriveOperations<'a> {
    session: &'a RequestSession,
}

impl<'a> DriveOperations<'a> {
    /// Create new operations handler for a session.
    pub fn new(session: &'a RequestSession) -> Self {
        Self { session }
    }

    /// List one page of a folder's direct children.
    ///
    /// `folder_id` defaults to the allowed folder.
    pub async fn list_files(
        &self,
        folder_id: Option<FolderId>,
        page_size: Option<u32>,
    ) -> Result<Vec<DriveFile>> {
        let folder_id =
            folder_id.unwrap_or_else(|| self.session.config().allowed_folder_id().clone());
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        debug!(folder_id = %folder_id, page_size, "Listing folder");
        self.session.gateway().list_files(&folder_id, page_size).await
    }

    /// Search the allowed folder by name.
    ///
    /// # Errors
    /// - `Error::InvalidInput` if the query is blank
    pub async fn search_files(
        &self,
        query: &str,
        page_size: Option<u32>,
    ) -> Result<Vec<DriveFile>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("Search query cannot be empty".to_string()));
        }

        let folder_id = self.session.config().allowed_folder_id();
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        debug!(folder_id = %folder_id, page_size, "Searching folder");
        self.session
            .gateway()
            .search_files(folder_id, query, page_size)
            .await
    }

    /// Get metadata for a file inside the allowed folder.
    ///
    /// # Errors
    /// - `Error::Forbidden` if the file is outside the allowed folder
    /// - Gateway errors from the metadata fetch
    pub async fn file_metadata(&self, file_id: &FileId) -> Result<DriveFile> {
        let metadata = self.session.gateway().get_metadata(file_id).await?;
        ensure_in_allowed_folder(self.session.config(), &metadata)?;
        Ok(metadata)
    }

    /// Extract the text of a file inside the allowed folder.
    ///
    /// # Preconditions
    /// - Session is open (caller authorized, credential resolved)
    ///
    /// # Postconditions
    /// - No content was fetched unless the folder check passed and the
    ///   mimetype has a strategy
    ///
    /// # Errors
    /// - `Error::Forbidden` if the file is outside the allowed folder
    /// - `Error::UnsupportedMediaType` for mimetypes other than Google Docs and PDF
    /// - Gateway and extraction errors, unretried
    pub async fn file_text(&self, file_id: &FileId) -> Result<ExtractedText> {
        let metadata = self.file_metadata(file_id).await?;
        let strategy = ExtractionStrategy::for_mime_type(&metadata.mime_type);

        let text = match strategy {
            ExtractionStrategy::NativeExport => {
                let bytes = self.session.gateway().export_text(file_id).await?;
                decode_export(&bytes)
            }
            ExtractionStrategy::PdfDownload => {
                let bytes = self.session.gateway().download(file_id).await?;
                self.session.extractor().extract_pdf(bytes).await?
            }
            ExtractionStrategy::Unsupported => return Err(unsupported(&metadata.mime_type)),
        };

        info!(
            file_id = %file_id,
            strategy = ?strategy,
            chars = text.len(),
            "Extracted file text"
        );

        Ok(ExtractedText {
            file_id: file_id.as_str().to_string(),
            name: metadata.name,
            mime_type: metadata.mime_type,
            text,
        })
    }
}
