//! # dlb-catalog: Entity Store, Hierarchy, and Scope Aggregation
//!
//! Holds the read-only legal catalog and answers every browse query the
//! front-end makes.
//!
//! ## Modules
//!
//! - **Store** (`store.rs`): id-indexed arenas for each record kind,
//!   by-id and by-parent lookups, load-time validation.
//! - **Hierarchy** (`hierarchy.rs`): root-first ancestor chains over
//!   jurisdiction parent links.
//! - **Scope** (`scope.rs`): acts inherited along the ancestor chain for a
//!   given governmental tier, and flat jurisdiction/law-type filtering.
//! - **Search** (`search.rs`): substring search over sections with
//!   optional act-level filters.
//! - **Loader** (`loader.rs`) and **Seed** (`seed.rs`): YAML/JSON catalog
//!   files and the built-in catalog.
//!
//! Queries never fail. Unknown ids produce `None` or an empty list.

pub mod error;
pub mod hierarchy;
pub mod loader;
pub mod scope;
pub mod search;
pub mod seed;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use loader::load_document;
pub use scope::filter_acts;
pub use search::SearchFilters;
pub use seed::seed_document;
pub use store::{Catalog, CatalogDocument, SectionContext};
