//! Google Drive API client.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use drivegate_common::{Error, FileId, FolderId, Result};

use super::auth::TokenSource;
use crate::provider::{DriveFile, DriveGateway, TEXT_EXPORT_MIME_TYPE};
use crate::query;

/// Google Drive API base URL.
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Response from listing files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Google Drive API client bound to one token source.
pub struct DriveClient {
    http: Client,
    tokens: Arc<dyn TokenSource>,
    base_url: String,
}

impl DriveClient {
    /// Create a client against the API root `base_url`
    /// (normally [`DRIVE_API_BASE`]).
    pub fn with_base_url(
        http: Client,
        tokens: Arc<dyn TokenSource>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            tokens,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get authorization header.
    async fn auth_header(&self) -> Result<String> {
        let token = self.tokens.access_token().await?;
        Ok(format!("Bearer {}", token))
    }

    /// URL of one file resource; the id is percent-encoded so it stays a
    /// single path segment.
    fn file_url(&self, file_id: &FileId) -> String {
        format!(
            "{}/files/{}",
            self.base_url,
            utf8_percent_encode(file_id.as_str(), NON_ALPHANUMERIC)
        )
    }

    /// Run a single-page `files.list` query.
    async fn list_page(&self, q: &str, page_size: u32) -> Result<Vec<DriveFile>> {
        let url = format!("{}/files", self.base_url);
        let auth = self.auth_header().await?;
        let page_size = query::clamp_page_size(page_size).to_string();

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .query(&[
                ("q", q),
                ("pageSize", page_size.as_str()),
                ("fields", query::LIST_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to list files: {}", e)))?;

        let list_response: FileListResponse = self.handle_response(response).await?;
        Ok(list_response.files)
    }

    /// Read a successful media response chunk by chunk into one buffer.
    async fn read_body(&self, mut response: reqwest::Response, what: &str) -> Result<Vec<u8>> {
        let mut buffer = match response.content_length() {
            Some(len) => Vec::with_capacity(len as usize),
            None => Vec::new(),
        };

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::Gateway(format!("Interrupted {}: {}", what, e)))?
        {
            buffer.extend_from_slice(&chunk);
        }

        Ok(buffer)
    }

    /// Handle API response with error checking.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to parse response: {}", e)))
    }

    /// Map non-success statuses onto the error taxonomy.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound("File not found".to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(Error::Authentication(
                "Drive rejected the access token".to_string(),
            ))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Gateway(format!("Drive API error: {} - {}", status, body)))
        }
    }
}

#[async_trait]
impl DriveGateway for DriveClient {
    fn name(&self) -> &str {
        "gdrive"
    }

    async fn list_files(&self, folder_id: &FolderId, page_size: u32) -> Result<Vec<DriveFile>> {
        self.list_page(&query::in_folder(folder_id.as_str()), page_size)
            .await
    }

    async fn search_files(
        &self,
        folder_id: &FolderId,
        search: &str,
        page_size: u32,
    ) -> Result<Vec<DriveFile>> {
        self.list_page(
            &query::name_contains_in_folder(folder_id.as_str(), search),
            page_size,
        )
        .await
    }

    async fn get_metadata(&self, file_id: &FileId) -> Result<DriveFile> {
        let auth = self.auth_header().await?;

        let response = self
            .http
            .get(self.file_url(file_id))
            .header(header::AUTHORIZATION, auth)
            .query(&[("fields", query::METADATA_FIELDS)])
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to get file: {}", e)))?;

        self.handle_response(response).await
    }

    async fn download(&self, file_id: &FileId) -> Result<Vec<u8>> {
        let auth = self.auth_header().await?;

        let response = self
            .http
            .get(self.file_url(file_id))
            .header(header::AUTHORIZATION, auth)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to download file: {}", e)))?;

        let response = self.check_status(response).await?;
        self.read_body(response, "download").await
    }

    async fn export_text(&self, file_id: &FileId) -> Result<Vec<u8>> {
        let url = format!("{}/export", self.file_url(file_id));
        let auth = self.auth_header().await?;

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .query(&[("mimeType", TEXT_EXPORT_MIME_TYPE)])
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to export file: {}", e)))?;

        let response = self.check_status(response).await?;
        self.read_body(response, "export").await
    }
}
