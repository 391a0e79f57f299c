//! Google Drive gateway for drivegate.
//!
//! This module provides a read-only Drive v3 backend with:
//! - Service account (JWT assertion) and caller bearer-token authentication
//! - Single-page listing and name search scoped to one folder
//! - Chunked media download and plain-text export

pub mod auth;
pub mod client;
pub mod provider;

pub use auth::{BearerToken, ServiceAccountAuth, ServiceAccountKey, TokenSource};
pub use client::DriveClient;
pub use provider::DriveConnector;
