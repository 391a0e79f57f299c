//! Access policy and content normalization for drivegate.
//!
//! This module provides:
//! - Startup configuration (auth mode, allowed folder, secrets)
//! - Caller authorization and credential resolution per auth mode
//! - Folder containment checks
//! - Mimetype-driven text extraction
//!
//! # Architecture
//! Every request follows the same order: caller authorization, credential
//! resolution, metadata fetch, folder check, content fetch. A
//! [`RequestSession`] covers the first two steps; [`DriveOperations`] the
//! rest.

pub mod auth;
pub mod config;
pub mod extract;
pub mod guard;
pub mod operations;
pub mod service;
pub mod session;

pub use config::ConnectorConfig;
pub use extract::{ExtractionStrategy, PdfTextExtractor, TextExtractor};
pub use operations::{DriveOperations, ExtractedText, DEFAULT_PAGE_SIZE};
pub use service::DriveService;
pub use session::RequestSession;
