//! # Error Types
//!
//! Every failure in this crate is deterministic given its input, so none of
//! these errors are retryable. All use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Construction from an undeclared id is always surfaced, never coerced
//!   to a default state.
//! - Persisting requires a single atomic state; composites are rejected
//!   with [`StateError::NotAnAtomicState`] instead of being flattened.
//! - Catalog integrity violations only occur while a registry is built.

use thiserror::Error;

/// Top-level error type for thing-state operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An atomic state was constructed from an id absent from the catalog.
    #[error("invalid thing state identity: {id}")]
    InvalidStateIdentity {
        /// The rejected id.
        id: i64,
    },

    /// A single discrete state was required but a composite was supplied.
    #[error("{state} is not an atomic thing state")]
    NotAnAtomicState {
        /// Rendered text of the offending state.
        state: String,
    },

    /// A composite state was required but an atomic state was supplied.
    #[error("{state} is not a composite thing state")]
    NotACompositeState {
        /// Rendered text of the offending state.
        state: String,
    },

    /// Text matched neither a catalog name nor a pipe-joined list of
    /// atomic state names.
    #[error("unparseable state text: {text:?}")]
    UnparseableStateText {
        /// The input text, verbatim.
        text: String,
    },

    /// The catalog a registry was built from is inconsistent.
    #[error("catalog integrity violation: {0}")]
    CatalogIntegrityViolation(#[from] CatalogIntegrityViolation),
}

/// A catalog authoring bug detected while building a [`crate::Registry`].
///
/// These are never expected at runtime. For the built-in warehouse catalog
/// they abort the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogIntegrityViolation {
    /// Two catalog entries (atomic or composite) share a name.
    #[error("duplicate state name {name:?}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Two atomic states share an id.
    #[error("atomic states {first:?} and {second:?} share id {id}")]
    DuplicateId {
        /// The colliding id.
        id: i64,
        /// Name declared first with this id.
        first: String,
        /// Name declared later with this id.
        second: String,
    },

    /// A name is empty or contains characters reserved by the text codec.
    #[error("invalid state name {name:?}: names must be non-empty and contain no '|' or whitespace")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Persisted ids are non-negative.
    #[error("atomic state {name:?} declared with negative id {id}")]
    NegativeId {
        /// The atomic state name.
        name: String,
        /// The rejected id.
        id: i64,
    },

    /// A composite references a name not declared before it.
    #[error("composite {composite:?} references undeclared state {member:?}")]
    UnresolvedMember {
        /// The composite being declared.
        composite: String,
        /// The member name that did not resolve.
        member: String,
    },

    /// A composite was declared without members.
    #[error("composite {name:?} has no members")]
    EmptyComposite {
        /// The composite name.
        name: String,
    },
}
