//! HTTP surface for drivegate.
//!
//! Routes:
//! - `GET /health`
//! - `GET /drive/files`
//! - `GET /drive/search`
//! - `GET /file/{file_id}/meta`
//! - `GET /file/{file_id}/text`
//!
//! Every route except `/health` opens a fresh request session, so caller
//! authorization runs on each call.

pub mod error;
pub mod handlers;

use axum::extract::State;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::map_response_with_state;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use drivegate_common::AuthMode;
use drivegate_connector::DriveService;

pub use error::ApiError;

/// Shared application state.
pub struct AppState {
    pub service: DriveService,
}

/// Build the application router.
pub fn router(service: DriveService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/drive/files", get(handlers::list_files))
        .route("/drive/search", get(handlers::search_files))
        .route("/file/{file_id}/meta", get(handlers::file_meta))
        .route("/file/{file_id}/text", get(handlers::file_text))
        .layer(map_response_with_state(state.clone(), add_challenge))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Attach a `WWW-Authenticate` challenge to 401 responses.
async fn add_challenge(State(state): State<Arc<AppState>>, mut response: Response) -> Response {
    if response.status() == StatusCode::UNAUTHORIZED {
        let challenge = match state.service.auth_mode() {
            AuthMode::OAuth => HeaderValue::from_static("Bearer"),
            AuthMode::ServiceAccount => HeaderValue::from_static("ApiKey header=\"x-api-key\""),
        };
        response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
    }
    response
}
