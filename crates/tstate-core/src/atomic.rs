//! # Atomic State
//!
//! One indivisible, catalog-registered condition of a unit. This is the
//! only state kind that may be persisted.
//!
//! ## Validation
//!
//! Public construction from a raw id always checks the built-in warehouse
//! registry (building it on first use). The catalog's own constants are
//! produced by a crate-private `const fn` during declaration, before any
//! registry exists; that path is not reachable from outside this crate.

use std::borrow::Cow;

use crate::error::StateError;
use crate::identity::StateId;
use crate::state::StateSet;
use crate::warehouse;

/// A single discrete thing state.
///
/// Equality and hashing are by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomicState {
    id: StateId,
}

impl AtomicState {
    /// Catalog declaration. Skips validation; only for ids that are (or
    /// are about to be) registered.
    pub(crate) const fn declare(id: i64) -> Self {
        Self {
            id: StateId::new(id),
        }
    }

    /// Construct from a raw id, validated against the warehouse catalog.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidStateIdentity`] if `id` is not declared.
    pub fn new(id: i64) -> Result<Self, StateError> {
        warehouse::registry().atomic(id)
    }

    /// Construct from the integer stored for a unit. Same as [`Self::new`].
    pub fn from_persisted(id: i64) -> Result<Self, StateError> {
        Self::new(id)
    }

    /// The catalog identity.
    pub const fn id(&self) -> StateId {
        self.id
    }

    /// The integer to store for a unit.
    pub const fn to_persisted(&self) -> i64 {
        self.id.get()
    }

    /// Warehouse catalog name, or an `Unknown State` placeholder for an id
    /// the warehouse catalog does not declare.
    pub fn name(&self) -> Cow<'static, str> {
        warehouse::registry().name_of(*self)
    }
}

impl StateSet for AtomicState {
    fn member_ids(&self) -> &[StateId] {
        std::slice::from_ref(&self.id)
    }
}

impl From<AtomicState> for StateId {
    fn from(atomic: AtomicState) -> Self {
        atomic.id
    }
}

impl std::fmt::Display for AtomicState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::*;

    #[test]
    fn test_new_accepts_declared_ids() {
        let atomic = AtomicState::new(8_192).unwrap();
        assert_eq!(atomic, HELD_IN_SHELF_FOR_LOCAL);
        assert_eq!(atomic.id().get(), 8_192);
    }

    #[test]
    fn test_new_rejects_undeclared_ids() {
        for id in [33, 32_769, -1, i64::MAX] {
            assert_eq!(
                AtomicState::new(id).unwrap_err(),
                StateError::InvalidStateIdentity { id }
            );
        }
    }

    #[test]
    fn test_member_ids_is_single_element_view() {
        assert_eq!(IN_BASKET.member_ids(), &[StateId::new(16_384)]);
    }

    #[test]
    fn test_name_and_display() {
        assert_eq!(IN_PRIMORDIAL_SOUP.name(), "InPrimordialSoup");
        assert_eq!(RESERVED_IN_SHELF_FOR_EXPORT.to_string(), "ReservedInShelfForExport");
    }

    #[test]
    fn test_undeclared_name_is_placeholder() {
        let stray = AtomicState::declare(33);
        assert_eq!(stray.name(), "Unknown State: 33");
    }

    #[test]
    fn test_persisted_round_trip() {
        let stored = IN_PERISHABLE_TRANSIT.to_persisted();
        assert_eq!(AtomicState::from_persisted(stored).unwrap(), IN_PERISHABLE_TRANSIT);
    }
}
