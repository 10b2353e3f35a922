//! # Change Events
//!
//! The stores publish a [`StateEvent`] after every successful mutation so
//! that views can refresh without polling. Subscribers receive events in
//! emission order. Emitting with no subscribers is fine.

use serde::Serialize;
use tokio::sync::broadcast;

use dlb_core::{AnnotationId, BookmarkId, SectionId, UserId, VerificationStatus};

/// A committed change to the user overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    BookmarkAdded {
        id: BookmarkId,
        user_id: UserId,
        section_id: SectionId,
    },
    BookmarkRemoved {
        id: BookmarkId,
    },
    BookmarkNotesUpdated {
        id: BookmarkId,
    },
    AnnotationAdded {
        id: AnnotationId,
        user_id: UserId,
        section_id: SectionId,
        is_public: bool,
    },
    AnnotationUpdated {
        id: AnnotationId,
    },
    AnnotationDeleted {
        id: AnnotationId,
    },
    AnnotationVerified {
        id: AnnotationId,
        verifier: UserId,
        status: VerificationStatus,
    },
}

/// Broadcast channel for [`StateEvent`]s. Clones share one channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StateEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a bus that buffers up to `capacity` undelivered events per
    /// subscriber before the slowest one starts lagging.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn emit(&self, event: StateEvent) {
        tracing::trace!(event = ?event, "emitting state event");
        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
