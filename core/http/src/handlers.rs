//! Route handlers.
//!
//! Handlers open the request session before reading any query or path
//! input, so a malformed request from an unauthorized caller still gets 401.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use drivegate_common::{AuthMode, Error, FileId, FolderId};
use drivegate_connector::{DriveOperations, ExtractedText};
use drivegate_storage::DriveFile;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Liveness payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub ok: bool,
    pub auth_mode: AuthMode,
    pub version: &'static str,
}

/// A page of files.
#[derive(Debug, Serialize)]
pub struct FileList {
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub folder_id: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub page_size: Option<u32>,
}

fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError(Error::InvalidInput(rejection.body_text())))
}

/// `GET /health`. Needs no credentials and touches no gateway.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        ok: true,
        auth_mode: state.service.auth_mode(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /drive/files?folderId=&pageSize=`
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<FileList> {
    let session = state.service.open_session(&headers)?;
    let params = query_params(params)?;

    // An empty folderId falls back to the allowed folder.
    let folder_id = params
        .folder_id
        .filter(|id| !id.trim().is_empty())
        .map(FolderId::new)
        .transpose()?;

    let files = DriveOperations::new(&session)
        .list_files(folder_id, params.page_size)
        .await?;
    Ok(Json(FileList { files }))
}

/// `GET /drive/search?q=&pageSize=`
pub async fn search_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<FileList> {
    let session = state.service.open_session(&headers)?;
    let params = query_params(params)?;
    let query = params.q.unwrap_or_default();

    let files = DriveOperations::new(&session)
        .search_files(&query, params.page_size)
        .await?;
    Ok(Json(FileList { files }))
}

/// `GET /file/{file_id}/meta`
pub async fn file_meta(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(file_id): Path<String>,
) -> ApiResult<DriveFile> {
    let session = state.service.open_session(&headers)?;
    let file_id = FileId::new(file_id)?;

    let metadata = DriveOperations::new(&session).file_metadata(&file_id).await?;
    Ok(Json(metadata))
}

/// `GET /file/{file_id}/text`
pub async fn file_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(file_id): Path<String>,
) -> ApiResult<ExtractedText> {
    let session = state.service.open_session(&headers)?;
    let file_id = FileId::new(file_id)?;

    let text = DriveOperations::new(&session).file_text(&file_id).await?;
    Ok(Json(text))
}
