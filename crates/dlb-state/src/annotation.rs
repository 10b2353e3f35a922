//! # Annotation Store
//!
//! User-authored notes on sections, optionally public.
//!
//! ## Timestamps
//!
//! `created_at` is set once. `update` moves `updated_at` to the current
//! time, never backwards.
//!
//! ## Visibility
//!
//! An authenticated viewer sees every annotation on a section; an
//! anonymous viewer sees only public ones. Listings meant for display are
//! sorted newest `updated_at` first.
//!
//! ## Ownership
//!
//! `update` and `delete` require the acting user to be the author.
//! `set_verification` requires a curator or admin.

use std::cmp::Reverse;

use dlb_core::{Annotation, AnnotationId, SectionId, Timestamp, User, UserId, VerificationStatus};

use crate::error::{StateError, StateResult};
use crate::events::{EventBus, StateEvent};
use crate::store::Store;

/// Annotation collection.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    records: Store<Annotation>,
    events: EventBus,
}

fn ensure_author(actor: &UserId, annotation: &Annotation) -> StateResult<()> {
    if &annotation.user_id == actor {
        Ok(())
    } else {
        Err(StateError::NotOwner {
            actor: actor.clone(),
            record: annotation.id.to_string(),
        })
    }
}

fn ensure_content(content: &str) -> StateResult<()> {
    if content.trim().is_empty() {
        Err(StateError::EmptyContent)
    } else {
        Ok(())
    }
}

fn newest_first(mut annotations: Vec<Annotation>) -> Vec<Annotation> {
    annotations.sort_by_key(|a| Reverse(a.updated_at));
    annotations
}

impl AnnotationStore {
    /// Create a store pre-populated with `seed`.
    pub fn new(seed: Vec<Annotation>, events: EventBus) -> Self {
        Self {
            records: Store::with_records(seed),
            events,
        }
    }

    /// Attach a new annotation to a section.
    pub fn add(
        &self,
        user_id: &UserId,
        section_id: &SectionId,
        content: impl Into<String>,
        is_public: bool,
    ) -> StateResult<Annotation> {
        let content = content.into();
        ensure_content(&content)?;
        let now = Timestamp::now();
        let annotation = Annotation {
            id: AnnotationId::generate(),
            user_id: user_id.clone(),
            section_id: section_id.clone(),
            content,
            created_at: now,
            updated_at: now,
            is_public,
            verified_by: None,
            verification_status: None,
        };
        self.records.insert(annotation.clone());
        tracing::debug!(
            annotation_id = %annotation.id,
            user_id = %user_id,
            section_id = %section_id,
            is_public,
            "annotation added"
        );
        self.events.emit(StateEvent::AnnotationAdded {
            id: annotation.id.clone(),
            user_id: user_id.clone(),
            section_id: section_id.clone(),
            is_public,
        });
        Ok(annotation)
    }

    /// Replace content and visibility of an annotation authored by `actor`.
    pub fn update(
        &self,
        actor: &UserId,
        id: &AnnotationId,
        content: impl Into<String>,
        is_public: bool,
    ) -> StateResult<Annotation> {
        let content = content.into();
        ensure_content(&content)?;
        let updated = self
            .records
            .try_update::<_, StateError>(id, |a| {
                ensure_author(actor, a)?;
                a.content = content;
                a.is_public = is_public;
                a.updated_at = Timestamp::now().max(a.updated_at);
                Ok(a.clone())
            })
            .ok_or_else(|| StateError::AnnotationNotFound(id.clone()))??;
        tracing::debug!(annotation_id = %id, is_public, "annotation updated");
        self.events
            .emit(StateEvent::AnnotationUpdated { id: id.clone() });
        Ok(updated)
    }

    /// Delete an annotation authored by `actor`.
    pub fn delete(&self, actor: &UserId, id: &AnnotationId) -> StateResult<Annotation> {
        let removed = self
            .records
            .try_remove(id, |a| ensure_author(actor, a))
            .ok_or_else(|| StateError::AnnotationNotFound(id.clone()))??;
        tracing::debug!(annotation_id = %id, "annotation deleted");
        self.events
            .emit(StateEvent::AnnotationDeleted { id: id.clone() });
        Ok(removed)
    }

    /// Record a curator's review outcome.
    ///
    /// # Errors
    ///
    /// [`StateError::Forbidden`] unless `verifier` is a curator or admin.
    pub fn set_verification(
        &self,
        verifier: &User,
        id: &AnnotationId,
        status: VerificationStatus,
    ) -> StateResult<Annotation> {
        if !verifier.role.can_verify() {
            return Err(StateError::Forbidden {
                role: verifier.role,
                action: "verify annotations",
            });
        }
        let updated = self
            .records
            .try_update::<_, StateError>(id, |a| {
                a.verification_status = Some(status);
                a.verified_by = Some(verifier.id.clone());
                Ok(a.clone())
            })
            .ok_or_else(|| StateError::AnnotationNotFound(id.clone()))??;
        tracing::info!(annotation_id = %id, verifier = %verifier.id, %status, "annotation reviewed");
        self.events.emit(StateEvent::AnnotationVerified {
            id: id.clone(),
            verifier: verifier.id.clone(),
            status,
        });
        Ok(updated)
    }

    pub fn get(&self, id: &AnnotationId) -> Option<Annotation> {
        self.records.get(id)
    }

    /// A user's annotations, in creation order.
    pub fn by_user(&self, user_id: &UserId) -> Vec<Annotation> {
        self.records.filter(|a| &a.user_id == user_id)
    }

    /// A user's annotations, most recently updated first.
    pub fn by_user_newest_first(&self, user_id: &UserId) -> Vec<Annotation> {
        newest_first(self.by_user(user_id))
    }

    /// Every annotation on a section, public or not.
    pub fn by_section(&self, section_id: &SectionId) -> Vec<Annotation> {
        self.records.filter(|a| &a.section_id == section_id)
    }

    /// Public annotations on a section.
    pub fn public_by_section(&self, section_id: &SectionId) -> Vec<Annotation> {
        self.records
            .filter(|a| &a.section_id == section_id && a.is_public)
    }

    /// What `viewer` sees on a section, newest first: everything when
    /// authenticated, public annotations otherwise.
    pub fn visible_for_section(
        &self,
        section_id: &SectionId,
        viewer: Option<&UserId>,
    ) -> Vec<Annotation> {
        let annotations = match viewer {
            Some(_) => self.by_section(section_id),
            None => self.public_by_section(section_id),
        };
        newest_first(annotations)
    }

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
    use dlb_catalog::Catalog;

    fn store() -> AnnotationStore {
        let catalog = Catalog::seeded().unwrap();
        AnnotationStore::new(catalog.seed_annotations().to_vec(), EventBus::new())
    }

    fn uid(s: &str) -> UserId {
        s.parse().unwrap()
    }

    fn sid(s: &str) -> SectionId {
        s.parse().unwrap()
    }

    fn user(id: &str) -> User {
        Catalog::seeded()
            .unwrap()
            .user(&uid(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn private_annotation_hidden_from_public_listing() {
        let s = store();
        let a = s.add(&uid("user-1"), &sid("sec-1"), "x", false).unwrap();
        assert!(!s.public_by_section(&sid("sec-1")).contains(&a));
        assert!(s.by_section(&sid("sec-1")).contains(&a));
    }

    #[test]
    fn update_preserves_created_at() {
        let s = store();
        let before = s.get(&"anno-1".parse().unwrap()).unwrap();
        let after = s
            .update(&uid("user-1"), &before.id, "revised", false)
            .unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.content, "revised");
        assert!(!after.is_public);
    }

    #[test]
    fn update_never_moves_updated_at_backwards() {
        let mut seeded = store().get(&"anno-1".parse().unwrap()).unwrap();
        let future = Timestamp::parse("2999-01-01T00:00:00Z").unwrap();
        seeded.updated_at = future;
        let s = AnnotationStore::new(vec![seeded.clone()], EventBus::new());

        let after = s
            .update(&uid("user-1"), &seeded.id, "edited", true)
            .unwrap();
        assert_eq!(after.updated_at, future);
        assert_eq!(after.created_at, seeded.created_at);
        assert_eq!(s.get(&seeded.id).unwrap().updated_at, future);
    }

    #[test]
    fn add_sets_equal_timestamps() {
        let s = store();
        let a = s.add(&uid("user-3"), &sid("sec-2"), "note", true).unwrap();
        assert_eq!(a.created_at, a.updated_at);
        assert!(a.id.as_str().starts_with("anno-"));
    }

    #[test]
    fn blank_content_rejected() {
        let s = store();
        assert_eq!(
            s.add(&uid("user-1"), &sid("sec-1"), "   ", true).unwrap_err(),
            StateError::EmptyContent
        );
        assert_eq!(s.len(), 2);
        let anno1: AnnotationId = "anno-1".parse().unwrap();
        let before = s.get(&anno1).unwrap();
        assert!(s.update(&uid("user-1"), &anno1, "", true).is_err());
        assert_eq!(s.get(&anno1).unwrap(), before);
    }

    #[test]
    fn only_author_may_update_or_delete() {
        let s = store();
        let anno2: AnnotationId = "anno-2".parse().unwrap();
        assert!(matches!(
            s.update(&uid("user-1"), &anno2, "mine now", true).unwrap_err(),
            StateError::NotOwner { .. }
        ));
        assert!(matches!(
            s.delete(&uid("user-1"), &anno2).unwrap_err(),
            StateError::NotOwner { .. }
        ));
        assert!(s.get(&anno2).is_some());
        s.delete(&uid("user-2"), &anno2).unwrap();
        assert!(s.get(&anno2).is_none());
    }

    #[test]
    fn unknown_id_reports_not_found() {
        let s = store();
        let missing: AnnotationId = "anno-404".parse().unwrap();
        assert_eq!(
            s.delete(&uid("user-1"), &missing).unwrap_err(),
            StateError::AnnotationNotFound(missing.clone())
        );
        assert_eq!(
            s.update(&uid("user-1"), &missing, "x", true).unwrap_err(),
            StateError::AnnotationNotFound(missing)
        );
    }

    #[test]
    fn queries_by_user() {
        let s = store();
        s.add(&uid("user-1"), &sid("sec-3"), "later thought", false).unwrap();
        let mine = s.by_user(&uid("user-1"));
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, "anno-1");
        let newest = s.by_user_newest_first(&uid("user-1"));
        assert_eq!(newest[0].content, "later thought");
    }

    #[test]
    fn visibility_depends_on_viewer() {
        let s = store();
        s.add(&uid("user-2"), &sid("sec-1"), "private draft", false).unwrap();
        let anon = s.visible_for_section(&sid("sec-1"), None);
        assert_eq!(anon.len(), 1);
        assert_eq!(anon[0].id, "anno-1");

        let viewer = uid("user-1");
        let authed = s.visible_for_section(&sid("sec-1"), Some(&viewer));
        assert_eq!(authed.len(), 2);
        assert_eq!(authed[0].content, "private draft");
    }

    #[test]
    fn curator_verifies_user_cannot() {
        let s = store();
        let anno1: AnnotationId = "anno-1".parse().unwrap();
        assert!(matches!(
            s.set_verification(&user("user-1"), &anno1, VerificationStatus::Verified)
                .unwrap_err(),
            StateError::Forbidden { .. }
        ));
        let verified = s
            .set_verification(&user("user-2"), &anno1, VerificationStatus::Verified)
            .unwrap();
        assert_eq!(verified.verification_status, Some(VerificationStatus::Verified));
        assert_eq!(verified.verified_by, Some(uid("user-2")));
    }

    #[test]
    fn events_for_annotation_lifecycle() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let s = AnnotationStore::new(Vec::new(), bus);
        let a = s.add(&uid("user-1"), &sid("sec-1"), "x", true).unwrap();
        s.update(&uid("user-1"), &a.id, "y", true).unwrap();
        s.delete(&uid("user-1"), &a.id).unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            StateEvent::AnnotationAdded { is_public: true, .. }
        ));
        assert_eq!(rx.try_recv().unwrap(), StateEvent::AnnotationUpdated { id: a.id.clone() });
        assert_eq!(rx.try_recv().unwrap(), StateEvent::AnnotationDeleted { id: a.id });
    }
}
