//! # State Errors
//!
//! Every overlay mutation reports its outcome. A failed call leaves the
//! stores exactly as they were.

use thiserror::Error;

use dlb_core::{AnnotationId, BookmarkId, Role, SectionId, UserId};

/// Errors from the bookmark and annotation stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// No bookmark has this id.
    #[error("bookmark not found: {0}")]
    BookmarkNotFound(BookmarkId),

    /// No annotation has this id.
    #[error("annotation not found: {0}")]
    AnnotationNotFound(AnnotationId),

    /// The referenced section does not exist in the catalog.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// The acting user does not own the record.
    #[error("user {actor} does not own {record}")]
    NotOwner {
        /// The user attempting the change.
        actor: UserId,
        /// Id of the record they tried to change.
        record: String,
    },

    /// The acting user's role does not permit the operation.
    #[error("role {role} may not {action}")]
    Forbidden {
        role: Role,
        action: &'static str,
    },

    /// Annotation content was blank.
    #[error("annotation content must not be empty")]
    EmptyContent,
}

/// Errors from the authentication service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password was blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// No user matches the supplied email.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The operation needs a logged-in user.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Convenience alias for store results.
pub type StateResult<T> = Result<T, StateError>;
