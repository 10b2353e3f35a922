//! # Users and Roles

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    /// Reviews and verifies catalog content and public annotations.
    Curator,
    Admin,
    LawEnforcement,
    MunicipalAdmin,
}

impl Role {
    /// Return the snake_case string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Curator => "curator",
            Self::Admin => "admin",
            Self::LawEnforcement => "law_enforcement",
            Self::MunicipalAdmin => "municipal_admin",
        }
    }

    /// Whether this role may verify or reject annotations.
    pub fn can_verify(&self) -> bool {
        matches!(self, Self::Curator | Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where a user is based, by jurisdiction name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionAffiliation {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Unique across users, compared case-insensitively.
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionAffiliation>,
}

/// Canonical form of an email for matching: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Email comparison under [`normalize_email`] on both sides.
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == normalize_email(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_names() {
        let json = serde_json::to_string(&Role::MunicipalAdmin).unwrap();
        assert_eq!(json, "\"municipal_admin\"");
        let parsed: Role = serde_json::from_str("\"law_enforcement\"").unwrap();
        assert_eq!(parsed, Role::LawEnforcement);
    }

    #[test]
    fn only_curators_and_admins_verify() {
        assert!(Role::Curator.can_verify());
        assert!(Role::Admin.can_verify());
        assert!(!Role::User.can_verify());
        assert!(!Role::MunicipalAdmin.can_verify());
    }

    #[test]
    fn email_match_ignores_case_and_padding() {
        let user = User {
            id: UserId::new("user-1").unwrap(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            role: Role::User,
            avatar_url: None,
            jurisdiction: None,
        };
        assert!(user.has_email(" John@Example.COM "));
        assert!(!user.has_email("jane@example.com"));
    }

    #[test]
    fn email_match_folds_non_ascii_case() {
        let user = User {
            id: UserId::new("user-7").unwrap(),
            name: "Élodie".into(),
            email: " ÉLODIE@example.com".into(),
            role: Role::User,
            avatar_url: None,
            jurisdiction: None,
        };
        assert!(user.has_email("élodie@EXAMPLE.com"));
        assert_eq!(normalize_email(&user.email), "élodie@example.com");
    }
}
