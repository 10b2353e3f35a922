//! # Application State
//!
//! Wires the catalog, overlay stores, auth service, and event bus into one
//! cloneable handle. All stores share the same [`EventBus`].

use std::sync::Arc;

use dlb_catalog::Catalog;

use crate::annotation::AnnotationStore;
use crate::auth::{AuthConfig, AuthService};
use crate::bookmark::BookmarkStore;
use crate::events::EventBus;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub bookmarks: BookmarkStore,
    pub annotations: AnnotationStore,
    pub auth: AuthService,
    pub events: EventBus,
}

impl AppState {
    /// Build state over `catalog`, seeding the overlay stores from it.
    pub fn new(catalog: Arc<Catalog>, auth: AuthConfig) -> Self {
        let events = EventBus::new();
        let bookmarks = BookmarkStore::new(Arc::clone(&catalog), events.clone());
        let annotations =
            AnnotationStore::new(catalog.seed_annotations().to_vec(), events.clone());
        let auth = AuthService::new(Arc::clone(&catalog), auth);
        tracing::debug!(
            bookmarks = bookmarks.len(),
            annotations = annotations.len(),
            "application state initialized"
        );
        Self {
            catalog,
            bookmarks,
            annotations,
            auth,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_share_one_bus() {
        let state = AppState::new(Arc::new(Catalog::seeded().unwrap()), AuthConfig::instant());
        let mut rx = state.events.subscribe();
        let user = "user-3".parse().unwrap();
        let section = "sec-2".parse().unwrap();
        state.bookmarks.add(&user, &section, None).unwrap();
        state.annotations.add(&user, &section, "note", true).unwrap();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn clones_share_overlay() {
        let state = AppState::new(Arc::new(Catalog::seeded().unwrap()), AuthConfig::instant());
        let other = state.clone();
        let user = "user-3".parse().unwrap();
        state
            .bookmarks
            .add(&user, &"sec-1".parse().unwrap(), None)
            .unwrap();
        assert_eq!(other.bookmarks.by_user(&user).len(), 1);
    }
}
