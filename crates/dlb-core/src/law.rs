//! # Legal Catalog Records
//!
//! Law types, acts, amendments, chapters, and sections. Ownership runs
//! top-down (an act owns its chapters, a chapter owns its sections) but
//! every record refers upward by id only.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DlbError;
use crate::identity::{
    ActId, AmendmentId, ChapterId, FineId, JurisdictionId, LawTypeId, PrecedentId, SectionId,
    UserId,
};
use crate::jurisdiction::Scope;
use crate::temporal::Timestamp;

/// Subject-matter category of a law type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawCategory {
    General,
    Traffic,
    Municipal,
    Environmental,
    Construction,
    Police,
    Transport,
    Tax,
}

impl LawCategory {
    /// All categories in declaration order.
    pub const ALL: [LawCategory; 8] = [
        LawCategory::General,
        LawCategory::Traffic,
        LawCategory::Municipal,
        LawCategory::Environmental,
        LawCategory::Construction,
        LawCategory::Police,
        LawCategory::Transport,
        LawCategory::Tax,
    ];

    /// Return the snake_case string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Traffic => "traffic",
            Self::Municipal => "municipal",
            Self::Environmental => "environmental",
            Self::Construction => "construction",
            Self::Police => "police",
            Self::Transport => "transport",
            Self::Tax => "tax",
        }
    }
}

impl std::fmt::Display for LawCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LawCategory {
    type Err = DlbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DlbError::UnknownVariant {
                kind: "law category",
                value: s.to_string(),
            })
    }
}

/// A family of acts within one jurisdiction (e.g. "Traffic Rules").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawType {
    pub id: LawTypeId,
    pub name: String,
    pub description: String,
    pub jurisdiction_id: JurisdictionId,
    pub scope: Scope,
    pub category: LawCategory,
}

/// A recorded amendment to an act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amendment {
    pub id: AmendmentId,
    pub act_id: ActId,
    pub description: String,
    pub date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<UserId>,
}

/// A single piece of legislation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Act {
    pub id: ActId,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub law_type_id: LawTypeId,
    pub jurisdiction_id: JurisdictionId,
    pub scope: Scope,
    pub last_updated: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amendments: Vec<Amendment>,
}

impl Act {
    /// An act counts as verified only when both the verification time and
    /// the verifying curator are recorded.
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some() && self.verified_by.is_some()
    }

    /// Whether `text` occurs in the title or description (case-insensitive).
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

/// A chapter of an act. `number` is the chapter's ordinal within the act;
/// ordinals need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub act_id: ActId,
    pub title: String,
    pub number: u32,
}

/// A monetary penalty prescribed by a section. `amount` is in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fine {
    pub id: FineId,
    pub amount: u64,
    pub currency: String,
    pub description: String,
    pub jurisdiction_id: JurisdictionId,
    pub last_updated: Timestamp,
}

/// A court decision interpreting a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precedent {
    pub id: PrecedentId,
    pub title: String,
    pub citation: String,
    pub summary: String,
    pub date: Timestamp,
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A section of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub chapter_id: ChapterId,
    pub title: String,
    /// Display number, not necessarily numeric (`"39A"`).
    pub number: String,
    /// Paragraphs separated by blank lines.
    pub content: String,
    pub last_updated: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_jurisdictions: Option<Vec<JurisdictionId>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fines: Vec<Fine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub precedents: Vec<Precedent>,
}

impl Section {
    /// Split the content into paragraphs on blank lines, trimming each and
    /// dropping empty ones.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Case-insensitive substring match over title, content, and number.
    /// `needle_lower` must already be lowercased.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
            || self.number.to_lowercase().contains(needle_lower)
    }
}
