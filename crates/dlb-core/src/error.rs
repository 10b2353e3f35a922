//! # Error Types
//!
//! Errors raised while constructing or parsing the foundational types.
//! Higher crates wrap [`DlbError`] in their own error enums.

use thiserror::Error;

/// Top-level error type for `dlb-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DlbError {
    /// An identifier was empty or whitespace-only.
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier {
        /// Which identifier namespace rejected the value.
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// A string did not name any variant of a closed enum.
    #[error("unknown {kind}: {value:?}")]
    UnknownVariant {
        /// The enum being parsed (e.g. `scope`).
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// A timestamp string was malformed or not UTC.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
