//! Catalog error types.
//!
//! Raised while loading and validating a catalog. Queries over a built
//! catalog never fail; absent entities resolve to `None` or an empty list.

use std::path::PathBuf;

use thiserror::Error;

use dlb_core::{ActId, JurisdictionId};

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The embedded seed document failed to parse.
    #[error("embedded seed catalog is malformed: {0}")]
    Seed(#[source] serde_yaml::Error),

    /// A catalog file was not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file extension does not name a supported format.
    #[error("unsupported catalog format at {path} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Two records of the same kind share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Two users share an email address (compared case-insensitively).
    #[error("duplicate user email: {email}")]
    DuplicateEmail { email: String },

    /// Following parent links from a jurisdiction revisits a jurisdiction.
    #[error("jurisdiction parent chain contains a cycle through {jurisdiction_id}")]
    ParentCycle { jurisdiction_id: JurisdictionId },

    /// Two chapters of one act carry the same ordinal.
    #[error("act {act_id} has more than one chapter numbered {number}")]
    DuplicateChapterNumber { act_id: ActId, number: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = Result<T, CatalogError>;
