//! Catalog file loading.
//!
//! The format is chosen by extension: `.yaml`/`.yml` through serde_yaml,
//! `.json` through serde_json. Parse errors carry the file path.

use std::path::Path;

use crate::error::{CatalogError, CatalogResult};
use crate::store::{Catalog, CatalogDocument};

fn read(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })
}

/// Read a catalog document without validating it.
pub fn load_document(path: &Path) -> CatalogResult<CatalogDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml" | "yml") => {
            let content = read(path)?;
            serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })
        }
        Some("json") => {
            let content = read(path)?;
            serde_json::from_str(&content).map_err(|e| CatalogError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })
        }
        _ => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

impl Catalog {
    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        tracing::debug!(path = %path.display(), "loading catalog");
        Self::build(load_document(path)?)
    }
}
