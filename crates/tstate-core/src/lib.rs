//! # tstate-core: Thing-State Algebra for Warehouse Inventory
//!
//! Every inventory unit tracked by the warehouse services is in exactly one
//! catalog-registered *atomic* state. Queries, rules and reports talk about
//! *composite* states: named or ad hoc sets of atomic states. This crate
//! defines both, the set algebra between them, the catalog they are
//! declared in, and the text codec used at API and tooling boundaries.
//!
//! ## Key Design Principles
//!
//! 1. **Validated construction.** An [`AtomicState`] built from a raw id is
//!    checked against the catalog. An undeclared id is an error, never a
//!    silent default.
//!
//! 2. **One representation for set algebra.** Atomic and composite states
//!    both expose a sorted, distinct slice of member ids through
//!    [`StateSet`]. Union, superset and overlap are written once against
//!    that slice.
//!
//! 3. **Only atomics persist.** [`ThingState::to_persisted`] refuses a
//!    composite instead of flattening it.
//!
//! 4. **Declarative catalog.** The warehouse catalog is an explicit, ordered
//!    table ([`warehouse::catalog`]). Name resolution tables are derived
//!    from it once, in a [`Registry`], and never mutated afterwards.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests. The one panic path is a built-in catalog
//!   that fails its own integrity check, see [`warehouse::registry`].
//! - Registries are immutable after build and safe to share across threads.

pub mod atomic;
pub mod catalog;
pub mod codec;
pub mod composite;
pub mod error;
pub mod identity;
pub mod persisted;
pub mod registry;
pub mod state;
pub mod warehouse;

// Re-export primary types for ergonomic imports.
pub use atomic::AtomicState;
pub use catalog::{AtomicDefinition, Catalog, CatalogBuilder, CompositeDefinition};
pub use composite::CompositeState;
pub use error::{CatalogIntegrityViolation, StateError};
pub use identity::StateId;
pub use registry::Registry;
pub use state::{union, StateSet, ThingState};
pub use warehouse::NamedComposite;
