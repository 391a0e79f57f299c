//! Common utilities and types shared across drivegate modules.
//!
//! This module provides the error taxonomy and the identifier types used by
//! the storage gateway, the access policy and the HTTP surface.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AuthMode, FileId, FolderId};
