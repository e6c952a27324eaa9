//! # Catalog Declaration
//!
//! The catalog is an explicit, ordered table of atomic states followed by
//! named composites. It is plain data: validation and name resolution
//! happen when a [`crate::Registry`] is built from it.
//!
//! ## Two-Phase Builder
//!
//! ```text
//! CatalogBuilder::new()              // CatalogBuilder<DeclaringAtomics>
//!     .atomic("HeldInShelfForExport", 4096)
//!     .atomic("HeldInShelfForLocal", 8192)
//!     .composites()                  // CatalogBuilder<DeclaringComposites>
//!     .composite("HeldInShelf", ["HeldInShelfForExport", "HeldInShelfForLocal"])
//!     .finish()                      // Catalog
//! ```
//!
//! There is no `.atomic()` on `CatalogBuilder<DeclaringComposites>`, so every
//! atomic is registered before the first composite. A composite may name
//! atomics or composites declared before it; anything else is rejected at
//! registry build as [`crate::CatalogIntegrityViolation::UnresolvedMember`].
//!
//! ```compile_fail
//! use tstate_core::catalog::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new()
//!     .atomic("InBasket", 16384)
//!     .composites()
//!     // ERROR: no method named `atomic` found for `CatalogBuilder<DeclaringComposites>`
//!     .atomic("InReadyBasket", 549755813888)
//!     .finish();
//! ```
//!
//! The same table can be authored as YAML or JSON:
//!
//! ```text
//! atomic:
//!   - { name: HeldInShelfForExport, id: 4096 }
//!   - { name: HeldInShelfForLocal, id: 8192 }
//! composite:
//!   - { name: HeldInShelf, members: [HeldInShelfForExport, HeldInShelfForLocal] }
//! ```

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Declaration of one atomic state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicDefinition {
    /// Unique, stable name.
    pub name: String,
    /// Unique persisted id.
    pub id: i64,
    /// Retired state still accepted for persisted data.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

/// Declaration of one named composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeDefinition {
    /// Unique, stable name.
    pub name: String,
    /// Names of previously declared atomic or composite states.
    pub members: Vec<String>,
}

/// The ordered declaration table for a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Atomic states in declaration order.
    #[serde(default)]
    pub atomic: Vec<AtomicDefinition>,
    /// Named composites in declaration order.
    #[serde(default)]
    pub composite: Vec<CompositeDefinition>,
}

// ── Builder Types ────────────────────────────────────────────────────

/// Marker type: the builder accepts atomic declarations.
#[derive(Debug)]
pub struct DeclaringAtomics;

/// Marker type: the builder accepts composite declarations only.
#[derive(Debug)]
pub struct DeclaringComposites;

/// Builder for a [`Catalog`] that enforces atomics-then-composites order at
/// the type level.
#[derive(Debug)]
pub struct CatalogBuilder<P> {
    catalog: Catalog,
    _phase: PhantomData<P>,
}

impl CatalogBuilder<DeclaringAtomics> {
    /// Start an empty catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            _phase: PhantomData,
        }
    }

    /// Declare an atomic state.
    pub fn atomic(mut self, name: impl Into<String>, id: i64) -> Self {
        self.catalog.atomic.push(AtomicDefinition {
            name: name.into(),
            id,
            deprecated: false,
        });
        self
    }

    /// Declare a retired atomic state that persisted data may still hold.
    pub fn deprecated_atomic(mut self, name: impl Into<String>, id: i64) -> Self {
        self.catalog.atomic.push(AtomicDefinition {
            name: name.into(),
            id,
            deprecated: true,
        });
        self
    }

    /// Close the atomic phase. Transitions to `DeclaringComposites`.
    pub fn composites(self) -> CatalogBuilder<DeclaringComposites> {
        CatalogBuilder {
            catalog: self.catalog,
            _phase: PhantomData,
        }
    }
}

impl Default for CatalogBuilder<DeclaringAtomics> {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder<DeclaringComposites> {
    /// Declare a named composite as the union of earlier declarations.
    pub fn composite<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog.composite.push(CompositeDefinition {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// The finished declaration table.
    pub fn finish(self) -> Catalog {
        self.catalog
    }
}
