//! # User Overlay Records
//!
//! Bookmarks and annotations belong to a user and point at a section by
//! id. Deleting a section does not cascade; dependent records are left
//! pointing at an unknown id.

use serde::{Deserialize, Serialize};

use crate::identity::{AnnotationId, BookmarkId, SectionId, UserId};
use crate::temporal::Timestamp;

/// A user's saved reference to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub user_id: UserId,
    pub section_id: SectionId,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Curator review outcome for an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// Return the snake_case string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A user-authored note on a section.
///
/// `created_at` never changes after creation; `updated_at` is bumped on
/// every edit and is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub user_id: UserId,
    pub section_id: SectionId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
}
