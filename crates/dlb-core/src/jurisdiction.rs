//! # Jurisdiction Types
//!
//! A jurisdiction is a node in the governmental tree (country → state →
//! city). It refers to its parent by id only; it never owns the parent
//! record. Tree traversal lives in `dlb-catalog`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DlbError;
use crate::identity::JurisdictionId;

/// Governmental tier an act, law type, or jurisdiction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Country-wide legislation.
    National,
    /// State or province legislation.
    State,
    /// City or municipal by-laws.
    Municipal,
}

impl Scope {
    /// All scopes, broadest first.
    pub const ALL: [Scope; 3] = [Scope::National, Scope::State, Scope::Municipal];

    /// Return the snake_case string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::State => "state",
            Self::Municipal => "municipal",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DlbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national" => Ok(Self::National),
            "state" => Ok(Self::State),
            "municipal" => Ok(Self::Municipal),
            other => Err(DlbError::UnknownVariant {
                kind: "scope",
                value: other.to_string(),
            }),
        }
    }
}

/// Structural kind of a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionKind {
    Country,
    State,
    City,
}

impl JurisdictionKind {
    /// Return the snake_case string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
        }
    }
}

impl std::fmt::Display for JurisdictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A country, state, or city in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    pub name: String,
    /// Short code (`IN`, `KA`, `BLR`).
    pub code: String,
    #[serde(rename = "type")]
    pub kind: JurisdictionKind,
    pub scope: Scope,
    /// Parent jurisdiction, referenced by id. `None` for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<JurisdictionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
}

impl Jurisdiction {
    /// Whether this jurisdiction has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
