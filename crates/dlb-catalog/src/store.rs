//! # Entity Store
//!
//! The read-only catalog snapshot: every jurisdiction, law type, act,
//! chapter, section, and user, held in id-indexed arenas. Built once from
//! a [`CatalogDocument`] and never mutated afterwards.
//!
//! ## Load-time validation
//!
//! [`Catalog::build()`] rejects:
//! - duplicate ids within one record kind,
//! - duplicate user emails (trimmed, case-insensitive),
//! - cycles in jurisdiction parent links,
//! - two chapters of one act sharing an ordinal.
//!
//! Dangling parent references are accepted and logged; the chain walk
//! treats them as the end of the chain.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use dlb_core::{
    normalize_email, Act, ActId, Annotation, Bookmark, Chapter, ChapterId, Jurisdiction,
    JurisdictionId, LawType, LawTypeId, Section, SectionId, User, UserId,
};

use crate::error::{CatalogError, CatalogResult};
use crate::hierarchy;

// ─── Catalog document ────────────────────────────────────────────────

/// Serialized form of a catalog, as read from YAML or JSON.
///
/// Every list is optional and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub jurisdictions: Vec<Jurisdiction>,
    pub law_types: Vec<LawType>,
    pub acts: Vec<Act>,
    pub chapters: Vec<Chapter>,
    pub sections: Vec<Section>,
    pub users: Vec<User>,
    /// Initial bookmarks handed to the bookmark store.
    pub bookmarks: Vec<Bookmark>,
    /// Initial annotations handed to the annotation store.
    pub annotations: Vec<Annotation>,
}

// ─── Arena ───────────────────────────────────────────────────────────

/// Records of one kind in document order, indexed by id.
#[derive(Debug, Clone)]
pub(crate) struct Table<K, V> {
    rows: Vec<V>,
    index: HashMap<K, usize>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Display,
{
    fn build(rows: Vec<V>, kind: &'static str, key: impl Fn(&V) -> &K) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            let id = key(row);
            if index.insert(id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: id.to_string(),
                });
            }
        }
        Ok(Self { rows, index })
    }

    pub(crate) fn get(&self, id: &K) -> Option<&V> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    pub(crate) fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, V> {
        self.rows.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

fn ensure_unique<'a, K>(
    ids: impl Iterator<Item = &'a K>,
    kind: &'static str,
) -> CatalogResult<()>
where
    K: Eq + Hash + std::fmt::Display + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

// ─── Catalog ─────────────────────────────────────────────────────────

/// A section together with the chapter and act that own it.
///
/// Either parent may be missing when the catalog refers to an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionContext<'a> {
    pub section: &'a Section,
    pub chapter: Option<&'a Chapter>,
    pub act: Option<&'a Act>,
}

/// The validated, read-only catalog snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) jurisdictions: Table<JurisdictionId, Jurisdiction>,
    pub(crate) law_types: Table<LawTypeId, LawType>,
    pub(crate) acts: Table<ActId, Act>,
    pub(crate) chapters: Table<ChapterId, Chapter>,
    pub(crate) sections: Table<SectionId, Section>,
    pub(crate) users: Table<UserId, User>,
    bookmarks: Vec<Bookmark>,
    annotations: Vec<Annotation>,
}

impl Catalog {
    /// Validate a document and build the indexed snapshot.
    pub fn build(doc: CatalogDocument) -> CatalogResult<Self> {
        let CatalogDocument {
            jurisdictions,
            law_types,
            acts,
            chapters,
            sections,
            mut users,
            bookmarks,
            annotations,
        } = doc;

        for user in &mut users {
            user.email = user.email.trim().to_string();
        }

        let jurisdictions = Table::build(jurisdictions, "jurisdiction", |j| &j.id)?;
        hierarchy::validate_parents(&jurisdictions)?;

        let law_types = Table::build(law_types, "law type", |l| &l.id)?;
        let acts = Table::build(acts, "act", |a| &a.id)?;
        let chapters = Table::build(chapters, "chapter", |c| &c.id)?;
        let sections = Table::build(sections, "section", |s| &s.id)?;
        let users = Table::build(users, "user", |u| &u.id)?;

        ensure_unique(bookmarks.iter().map(|b| &b.id), "bookmark")?;
        ensure_unique(annotations.iter().map(|a| &a.id), "annotation")?;

        let mut emails = HashSet::new();
        for user in users.iter() {
            if !emails.insert(normalize_email(&user.email)) {
                return Err(CatalogError::DuplicateEmail {
                    email: user.email.clone(),
                });
            }
        }

        let mut ordinals = HashSet::new();
        for chapter in chapters.iter() {
            if !ordinals.insert((&chapter.act_id, chapter.number)) {
                return Err(CatalogError::DuplicateChapterNumber {
                    act_id: chapter.act_id.clone(),
                    number: chapter.number,
                });
            }
        }

        tracing::info!(
            jurisdictions = jurisdictions.len(),
            law_types = law_types.len(),
            acts = acts.len(),
            chapters = chapters.len(),
            sections = sections.len(),
            users = users.len(),
            "catalog loaded"
        );

        Ok(Self {
            jurisdictions,
            law_types,
            acts,
            chapters,
            sections,
            users,
            bookmarks,
            annotations,
        })
    }

    // ── by-id lookups ────────────────────────────────────────────────

    pub fn jurisdiction(&self, id: &JurisdictionId) -> Option<&Jurisdiction> {
        self.jurisdictions.get(id)
    }

    pub fn law_type(&self, id: &LawTypeId) -> Option<&LawType> {
        self.law_types.get(id)
    }

    pub fn act(&self, id: &ActId) -> Option<&Act> {
        self.acts.get(id)
    }

    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.get(id)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Whether a section with this id exists.
    pub fn has_section(&self, id: &SectionId) -> bool {
        self.sections.contains(id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Find a user by email, ignoring case and surrounding whitespace.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.has_email(email))
    }

    // ── listings ─────────────────────────────────────────────────────

    /// All jurisdictions in document order.
    pub fn jurisdictions(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.jurisdictions.iter()
    }

    pub fn law_types(&self) -> impl Iterator<Item = &LawType> {
        self.law_types.iter()
    }

    pub fn acts(&self) -> impl Iterator<Item = &Act> {
        self.acts.iter()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Chapters of an act, ordered by chapter number.
    pub fn chapters_of(&self, act_id: &ActId) -> Vec<&Chapter> {
        let mut chapters: Vec<&Chapter> = self
            .chapters
            .iter()
            .filter(|c| &c.act_id == act_id)
            .collect();
        chapters.sort_by_key(|c| c.number);
        chapters
    }

    /// Sections of a chapter, in document order.
    pub fn sections_of(&self, chapter_id: &ChapterId) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|s| &s.chapter_id == chapter_id)
            .collect()
    }

    /// Resolve a section's owning chapter and act.
    pub fn section_context(&self, section_id: &SectionId) -> Option<SectionContext<'_>> {
        let section = self.section(section_id)?;
        Some(self.context_of(section))
    }

    pub(crate) fn context_of<'a>(&'a self, section: &'a Section) -> SectionContext<'a> {
        let chapter = self.chapter(&section.chapter_id);
        let act = chapter.and_then(|c| self.act(&c.act_id));
        SectionContext {
            section,
            chapter,
            act,
        }
    }

    // ── seeded overlay records ───────────────────────────────────────

    /// Bookmarks shipped with the catalog.
    pub fn seed_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Annotations shipped with the catalog.
    pub fn seed_annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
