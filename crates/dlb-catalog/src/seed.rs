//! Built-in catalog: India → Karnataka → Bengaluru, two acts, four
//! sections, three users, and their starter bookmarks and annotations.

use crate::error::{CatalogError, CatalogResult};
use crate::store::{Catalog, CatalogDocument};

const SEED_YAML: &str = include_str!("../data/seed.yaml");

/// Parse the embedded seed document.
pub fn seed_document() -> CatalogResult<CatalogDocument> {
    serde_yaml::from_str(SEED_YAML).map_err(CatalogError::Seed)
}

impl Catalog {
    /// Build the catalog from the embedded seed document.
    pub fn seeded() -> CatalogResult<Self> {
        Self::build(seed_document()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parses_and_validates() {
        let doc = seed_document().unwrap();
        assert_eq!(doc.jurisdictions.len(), 3);
        assert_eq!(doc.law_types.len(), 3);
        assert_eq!(doc.acts.len(), 2);
        assert_eq!(doc.chapters.len(), 4);
        assert_eq!(doc.sections.len(), 4);
        assert_eq!(doc.users.len(), 3);
        assert_eq!(doc.bookmarks.len(), 2);
        assert_eq!(doc.annotations.len(), 2);
        assert!(Catalog::build(doc).is_ok());
    }

    #[test]
    fn seed_sections_keep_paragraphs() {
        let c = Catalog::seeded().unwrap();
        let sec = c.section(&"sec-1".parse().unwrap()).unwrap();
        assert_eq!(sec.paragraphs().len(), 2);
        let sec = c.section(&"sec-3".parse().unwrap()).unwrap();
        assert_eq!(sec.paragraphs().len(), 1);
    }

    #[test]
    fn seed_acts_are_verified() {
        let c = Catalog::seeded().unwrap();
        assert!(c.acts().all(|a| a.is_verified()));
    }
}
