//! # Identifier Newtypes
//!
//! String-backed identifiers for every record kind in the catalog and the
//! user overlay. Each identifier is a distinct type.
//!
//! ## Validation
//!
//! Identifiers must be non-empty after trimming. Validation runs on
//! construction and on deserialization, so a catalog document containing
//! `id: ""` is rejected at load time rather than producing an unreachable
//! record.
//!
//! Seeded identifiers keep whatever form the catalog author chose
//! (`jur-1`, `sec-39A`, ...). Identifiers minted at runtime for bookmarks
//! and annotations use a kind prefix plus a random UUID (`bm-<uuid>`,
//! `anno-<uuid>`), so two records created in the same instant never collide.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DlbError;

/// Defines a validated string identifier newtype.
///
/// Serializes as a plain string. Deserializes as a plain `String`, then
/// routes through `new()` so that invalid values are rejected.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier, rejecting empty or whitespace-only values.
            pub fn new(value: impl Into<String>) -> Result<Self, DlbError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DlbError::InvalidIdentifier {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = DlbError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_id!(
    /// Identifier of a jurisdiction (country, state, or city).
    JurisdictionId,
    "jurisdiction"
);
string_id!(
    /// Identifier of a law type (a family of acts within a jurisdiction).
    LawTypeId,
    "law type"
);
string_id!(
    /// Identifier of a single act.
    ActId,
    "act"
);
string_id!(
    /// Identifier of an amendment to an act.
    AmendmentId,
    "amendment"
);
string_id!(
    /// Identifier of a chapter within an act.
    ChapterId,
    "chapter"
);
string_id!(
    /// Identifier of a section within a chapter.
    SectionId,
    "section"
);
string_id!(
    /// Identifier of a fine attached to a section.
    FineId,
    "fine"
);
string_id!(
    /// Identifier of a judicial precedent attached to a section.
    PrecedentId,
    "precedent"
);
string_id!(
    /// Identifier of a user account.
    UserId,
    "user"
);
string_id!(
    /// Identifier of a bookmark.
    BookmarkId,
    "bookmark"
);
string_id!(
    /// Identifier of an annotation.
    AnnotationId,
    "annotation"
);

impl BookmarkId {
    /// Mint a fresh bookmark identifier (`bm-<uuid>`).
    pub fn generate() -> Self {
        Self(format!("bm-{}", Uuid::new_v4()))
    }
}

impl AnnotationId {
    /// Mint a fresh annotation identifier (`anno-<uuid>`).
    pub fn generate() -> Self {
        Self(format!("anno-{}", Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let id = SectionId::new("  sec-1 ").unwrap();
        assert_eq!(id.as_str(), "sec-1");
    }

    #[test]
    fn new_rejects_blank() {
        let err = ActId::new("   ").unwrap_err();
        assert!(matches!(err, DlbError::InvalidIdentifier { kind: "act", .. }));
        assert!(JurisdictionId::new("").is_err());
    }

    #[test]
    fn deserialize_rejects_blank() {
        let result: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ChapterId::new("ch-4").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ch-4\"");
    }

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = BookmarkId::generate();
        let b = BookmarkId::generate();
        assert!(a.as_str().starts_with("bm-"));
        assert_ne!(a, b);
        assert!(AnnotationId::generate().as_str().starts_with("anno-"));
    }

    #[test]
    fn compares_with_str() {
        let id = JurisdictionId::new("jur-2").unwrap();
        assert!(id == "jur-2");
        assert_eq!(id.to_string(), "jur-2");
    }
}
