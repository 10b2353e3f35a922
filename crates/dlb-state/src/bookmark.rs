//! # Bookmark Store
//!
//! Per-user saved references to sections.
//!
//! `add` only creates a record when the section exists in the catalog. It
//! does not deduplicate: two `add` calls for the same (user, section) pair
//! create two bookmarks. Callers that want toggle behavior use
//! [`BookmarkStore::toggle()`], which checks for an existing bookmark first.
//!
//! `remove` and `update_notes` require the acting user to own the bookmark.

use std::sync::Arc;

use serde::Serialize;

use dlb_catalog::{Catalog, SectionContext};
use dlb_core::{Bookmark, BookmarkId, SectionId, Timestamp, UserId};

use crate::error::{StateError, StateResult};
use crate::events::{EventBus, StateEvent};
use crate::store::Store;

/// Outcome of [`BookmarkStore::toggle()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled {
    Added(Bookmark),
    Removed(Bookmark),
}

/// A bookmark joined with the section, chapter, and act it points at.
///
/// `context` is `None` when the section no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkDetail<'a> {
    pub bookmark: Bookmark,
    pub context: Option<SectionContext<'a>>,
}

/// Bookmark collection bound to a catalog.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    records: Store<Bookmark>,
    catalog: Arc<Catalog>,
    events: EventBus,
}

fn ensure_owner(actor: &UserId, bookmark: &Bookmark) -> StateResult<()> {
    if &bookmark.user_id == actor {
        Ok(())
    } else {
        Err(StateError::NotOwner {
            actor: actor.clone(),
            record: bookmark.id.to_string(),
        })
    }
}

impl BookmarkStore {
    /// Create a store seeded with the catalog's starter bookmarks.
    pub fn new(catalog: Arc<Catalog>, events: EventBus) -> Self {
        let records = Store::with_records(catalog.seed_bookmarks().to_vec());
        Self {
            records,
            catalog,
            events,
        }
    }

    /// Bookmark a section.
    ///
    /// # Errors
    ///
    /// [`StateError::SectionNotFound`] if the section is not in the catalog;
    /// no record is created.
    pub fn add(
        &self,
        user_id: &UserId,
        section_id: &SectionId,
        notes: Option<String>,
    ) -> StateResult<Bookmark> {
        if !self.catalog.has_section(section_id) {
            tracing::debug!(user_id = %user_id, section_id = %section_id, "bookmark rejected: unknown section");
            return Err(StateError::SectionNotFound(section_id.clone()));
        }
        let bookmark = Bookmark {
            id: BookmarkId::generate(),
            user_id: user_id.clone(),
            section_id: section_id.clone(),
            created_at: Timestamp::now(),
            notes,
        };
        self.records.insert(bookmark.clone());
        tracing::debug!(bookmark_id = %bookmark.id, user_id = %user_id, section_id = %section_id, "bookmark added");
        self.events.emit(StateEvent::BookmarkAdded {
            id: bookmark.id.clone(),
            user_id: user_id.clone(),
            section_id: section_id.clone(),
        });
        Ok(bookmark)
    }

    /// Delete a bookmark owned by `actor`.
    pub fn remove(&self, actor: &UserId, id: &BookmarkId) -> StateResult<Bookmark> {
        let removed = self
            .records
            .try_remove(id, |b| ensure_owner(actor, b))
            .ok_or_else(|| StateError::BookmarkNotFound(id.clone()))??;
        tracing::debug!(bookmark_id = %id, "bookmark removed");
        self.events
            .emit(StateEvent::BookmarkRemoved { id: id.clone() });
        Ok(removed)
    }

    /// Replace the notes on a bookmark owned by `actor`.
    pub fn update_notes(
        &self,
        actor: &UserId,
        id: &BookmarkId,
        notes: impl Into<String>,
    ) -> StateResult<Bookmark> {
        let notes = notes.into();
        let updated = self
            .records
            .try_update::<_, StateError>(id, |b| {
                ensure_owner(actor, b)?;
                b.notes = Some(notes);
                Ok(b.clone())
            })
            .ok_or_else(|| StateError::BookmarkNotFound(id.clone()))??;
        self.events
            .emit(StateEvent::BookmarkNotesUpdated { id: id.clone() });
        Ok(updated)
    }

    /// Add a bookmark if the user has none on this section, otherwise
    /// remove the existing one.
    pub fn toggle(&self, user_id: &UserId, section_id: &SectionId) -> StateResult<Toggled> {
        match self.record_for(user_id, section_id) {
            Some(existing) => self.remove(user_id, &existing.id).map(Toggled::Removed),
            None => self.add(user_id, section_id, None).map(Toggled::Added),
        }
    }

    pub fn get(&self, id: &BookmarkId) -> Option<Bookmark> {
        self.records.get(id)
    }

    /// A user's bookmarks, oldest first.
    pub fn by_user(&self, user_id: &UserId) -> Vec<Bookmark> {
        self.records.filter(|b| &b.user_id == user_id)
    }

    /// Whether the user has bookmarked the section.
    pub fn exists_for(&self, user_id: &UserId, section_id: &SectionId) -> bool {
        self.records
            .any(|b| &b.user_id == user_id && &b.section_id == section_id)
    }

    /// The user's first bookmark on the section, if any.
    pub fn record_for(&self, user_id: &UserId, section_id: &SectionId) -> Option<Bookmark> {
        self.records
            .find(|b| &b.user_id == user_id && &b.section_id == section_id)
    }

    /// A user's bookmarks with their section breadcrumbs.
    pub fn details_for_user(&self, user_id: &UserId) -> Vec<BookmarkDetail<'_>> {
        self.by_user(user_id)
            .into_iter()
            .map(|bookmark| {
                let context = self.catalog.section_context(&bookmark.section_id);
                BookmarkDetail { bookmark, context }
            })
            .collect()
    }

    /// Total number of bookmarks across all users.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BookmarkStore {
        BookmarkStore::new(Arc::new(Catalog::seeded().unwrap()), EventBus::new())
    }

    fn uid(s: &str) -> UserId {
        s.parse().unwrap()
    }

    fn sid(s: &str) -> SectionId {
        s.parse().unwrap()
    }

    #[test]
    fn seeded_from_catalog() {
        let s = store();
        assert_eq!(s.len(), 2);
        assert_eq!(s.by_user(&uid("user-1")).len(), 2);
        assert!(s.by_user(&uid("user-2")).is_empty());
    }

    #[test]
    fn add_then_exists() {
        let s = store();
        assert!(!s.exists_for(&uid("user-2"), &sid("sec-2")));
        let b = s.add(&uid("user-2"), &sid("sec-2"), Some("read later".into())).unwrap();
        assert!(s.exists_for(&uid("user-2"), &sid("sec-2")));
        assert_eq!(s.record_for(&uid("user-2"), &sid("sec-2")).unwrap(), b);
        assert_eq!(b.notes.as_deref(), Some("read later"));
    }

    #[test]
    fn remove_then_not_exists() {
        let s = store();
        let b = s.add(&uid("user-2"), &sid("sec-2"), None).unwrap();
        s.remove(&uid("user-2"), &b.id).unwrap();
        assert!(!s.exists_for(&uid("user-2"), &sid("sec-2")));
        assert!(s.get(&b.id).is_none());
    }

    #[test]
    fn unknown_section_creates_nothing() {
        let s = store();
        let err = s.add(&uid("user-1"), &sid("sec-404"), None).unwrap_err();
        assert_eq!(err, StateError::SectionNotFound(sid("sec-404")));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn add_does_not_deduplicate() {
        let s = store();
        let a = s.add(&uid("user-3"), &sid("sec-3"), None).unwrap();
        let b = s.add(&uid("user-3"), &sid("sec-3"), None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(s.by_user(&uid("user-3")).len(), 2);
    }

    #[test]
    fn unknown_id_reports_not_found() {
        let s = store();
        let missing: BookmarkId = "bm-404".parse().unwrap();
        assert_eq!(
            s.remove(&uid("user-1"), &missing).unwrap_err(),
            StateError::BookmarkNotFound(missing.clone())
        );
        assert!(s.update_notes(&uid("user-1"), &missing, "x").is_err());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn non_owner_cannot_modify() {
        let s = store();
        let bm1: BookmarkId = "bm-1".parse().unwrap();
        assert!(matches!(
            s.remove(&uid("user-2"), &bm1).unwrap_err(),
            StateError::NotOwner { .. }
        ));
        assert!(matches!(
            s.update_notes(&uid("user-2"), &bm1, "hijack").unwrap_err(),
            StateError::NotOwner { .. }
        ));
        let kept = s.get(&bm1).unwrap();
        assert_eq!(kept.notes.as_deref(), Some("Important for equality case research"));
    }

    #[test]
    fn update_notes_replaces() {
        let s = store();
        let bm2: BookmarkId = "bm-2".parse().unwrap();
        let updated = s.update_notes(&uid("user-1"), &bm2, "penal code scope").unwrap();
        assert_eq!(updated.notes.as_deref(), Some("penal code scope"));
        assert_eq!(s.get(&bm2).unwrap(), updated);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let s = store();
        let first = s.toggle(&uid("user-2"), &sid("sec-1")).unwrap();
        assert!(matches!(first, Toggled::Added(_)));
        let second = s.toggle(&uid("user-2"), &sid("sec-1")).unwrap();
        assert!(matches!(second, Toggled::Removed(_)));
        assert!(!s.exists_for(&uid("user-2"), &sid("sec-1")));
    }

    #[test]
    fn details_include_breadcrumb() {
        let s = store();
        let details = s.details_for_user(&uid("user-1"));
        assert_eq!(details.len(), 2);
        let ctx = details[1].context.unwrap();
        assert_eq!(ctx.section.id, "sec-4");
        assert_eq!(ctx.act.unwrap().title, "BBMP Solid Waste Management Bylaws");
    }

    #[test]
    fn mutations_emit_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let s = BookmarkStore::new(Arc::new(Catalog::seeded().unwrap()), bus);
        let b = s.add(&uid("user-2"), &sid("sec-2"), None).unwrap();
        s.update_notes(&uid("user-2"), &b.id, "n").unwrap();
        s.remove(&uid("user-2"), &b.id).unwrap();
        let _ = s.add(&uid("user-2"), &sid("sec-404"), None);

        assert!(matches!(rx.try_recv().unwrap(), StateEvent::BookmarkAdded { .. }));
        assert_eq!(
            rx.try_recv().unwrap(),
            StateEvent::BookmarkNotesUpdated { id: b.id.clone() }
        );
        assert_eq!(rx.try_recv().unwrap(), StateEvent::BookmarkRemoved { id: b.id });
        assert!(rx.try_recv().is_err());
    }
}
