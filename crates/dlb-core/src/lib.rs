//! # dlb-core: Foundational Types for the Digital Law Book
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: identifiers, timestamps, governmental scopes, and the record
//! types of the legal catalog (jurisdictions → law types → acts → chapters
//! → sections) together with the per-user overlay records (bookmarks and
//! annotations).
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `JurisdictionId`, `ActId`,
//!    `SectionId`, `UserId`, ... are distinct types. A `ChapterId` cannot be
//!    passed where a `SectionId` is expected.
//!
//! 2. **Closed enums for tiers and roles.** `Scope`, `JurisdictionKind`,
//!    `LawCategory`, `Role`, and `VerificationStatus` are exhaustive; every
//!    `match` over them must handle each variant.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] is always UTC, truncated to
//!    seconds, and renders as `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dlb-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public record types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod jurisdiction;
pub mod law;
pub mod overlay;
pub mod temporal;
pub mod user;

// Re-export primary types for ergonomic imports.
pub use error::DlbError;
pub use identity::{
    ActId, AmendmentId, AnnotationId, BookmarkId, ChapterId, FineId, JurisdictionId, LawTypeId,
    PrecedentId, SectionId, UserId,
};
pub use jurisdiction::{Jurisdiction, JurisdictionKind, Scope};
pub use law::{Act, Amendment, Chapter, Fine, LawCategory, LawType, Precedent, Section};
pub use overlay::{Annotation, Bookmark, VerificationStatus};
pub use temporal::Timestamp;
pub use user::{normalize_email, JurisdictionAffiliation, Role, User};
