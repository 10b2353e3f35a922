//! # dlb-state: User Overlay, Session, and Events
//!
//! Mutable state layered over the read-only catalog.
//!
//! - **Bookmarks** (`bookmark.rs`): per-user saved sections with notes.
//! - **Annotations** (`annotation.rs`): per-user notes on sections, with
//!   public/private visibility and curator review.
//! - **Auth** (`auth.rs`): explicit [`Session`] context and mock login.
//! - **Events** (`events.rs`): broadcast of committed changes.
//!
//! Mutations return a typed result. A failed call changes nothing.
//! Modifying or deleting a record requires the acting user to own it.

pub mod annotation;
pub mod app;
pub mod auth;
pub mod bookmark;
pub mod error;
pub mod events;
pub mod store;

pub use annotation::AnnotationStore;
pub use app::AppState;
pub use auth::{AuthConfig, AuthService, Session};
pub use bookmark::{BookmarkDetail, BookmarkStore, Toggled};
pub use error::{AuthError, StateError, StateResult};
pub use events::{EventBus, StateEvent};
pub use store::{Record, Store};
