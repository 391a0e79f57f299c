//! Remote storage gateway for drivegate.
//!
//! This module provides a trait-based interface over the remote storage
//! service (Google Drive) and an in-memory implementation for tests.
//!
//! # Design Principles
//! - Read-only: no operation mutates remote state
//! - Credential per request: gateways are bound to one resolved credential
//! - One attempt per call: retries belong to the caller's client, not here
//! - Unified error semantics: failures map onto `drivegate_common::Error`

pub mod credential;
pub mod gdrive;
pub mod memory;
pub mod provider;
pub mod query;

pub use credential::Credential;
pub use memory::{MemoryConnector, MemoryGateway};
pub use provider::{
    DriveFile, DriveGateway, GatewayConnector, Owner, GOOGLE_DOC_MIME_TYPE, PDF_MIME_TYPE,
    TEXT_EXPORT_MIME_TYPE,
};
