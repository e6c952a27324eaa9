//! # Thing State: Tagged Variant and Set Algebra
//!
//! A unit's state is either a single [`AtomicState`] or a [`CompositeState`]
//! (a set of atomics). Both expose the same representation through the
//! [`StateSet`] trait: a sorted, distinct slice of member ids. Union,
//! superset and overlap are implemented once against that slice, so no
//! per-pair operator overloads exist.
//!
//! ```text
//!   AtomicState ──member_ids()──▶ [id]            (one-element view)
//!   CompositeState ─member_ids()─▶ [id, id, ...]   (canonical form)
//!                         │
//!                         ▼
//!            union / is_superset_of / has_any_overlap
//! ```
//!
//! An atomic state never compares equal to a composite, even a composite
//! with that atomic as its only member. Only an atomic may be persisted.

use std::ops::BitOr;
use std::str::FromStr;

use crate::atomic::AtomicState;
use crate::composite::{self, CompositeState};
use crate::error::StateError;
use crate::identity::StateId;
use crate::warehouse;

/// Anything that denotes a set of atomic states.
///
/// Implementors must return their member ids sorted ascending without
/// duplicates; the default methods rely on it.
pub trait StateSet {
    /// The canonical member ids.
    fn member_ids(&self) -> &[StateId];

    /// True iff every member of `other` is a member of `self`.
    fn is_superset_of<S: StateSet + ?Sized>(&self, other: &S) -> bool {
        composite::contains_all(self.member_ids(), other.member_ids())
    }

    /// True iff `self` and `other` share at least one member.
    fn has_any_overlap<S: StateSet + ?Sized>(&self, other: &S) -> bool {
        composite::intersects(self.member_ids(), other.member_ids())
    }

    /// The union of both member sets, always as a composite.
    fn union<S: StateSet + ?Sized>(&self, other: &S) -> CompositeState {
        CompositeState::from_canonical(composite::merge(self.member_ids(), other.member_ids()))
    }
}

impl<T: StateSet + ?Sized> StateSet for &T {
    fn member_ids(&self) -> &[StateId] {
        (**self).member_ids()
    }
}

/// Union of two states. Commutative and associative; never fails.
pub fn union<A: StateSet + ?Sized, B: StateSet + ?Sized>(a: &A, b: &B) -> CompositeState {
    a.union(b)
}

/// The state of an inventory unit, or a query set over such states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThingState {
    /// One indivisible, catalog-registered condition.
    Atomic(AtomicState),
    /// A set of atomic states, named or anonymous.
    Composite(CompositeState),
}

impl ThingState {
    /// Whether this is a single discrete state.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic(_))
    }

    /// Whether this is a set of states.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    /// The atomic state, if this is one.
    pub fn as_atomic(&self) -> Option<AtomicState> {
        match self {
            Self::Atomic(atomic) => Some(*atomic),
            Self::Composite(_) => None,
        }
    }

    /// The composite state, if this is one.
    pub fn as_composite(&self) -> Option<&CompositeState> {
        match self {
            Self::Atomic(_) => None,
            Self::Composite(composite) => Some(composite),
        }
    }

    /// Narrow to an atomic state, failing for composites.
    pub fn to_atomic_or_fail(&self) -> Result<AtomicState, StateError> {
        self.as_atomic().ok_or_else(|| StateError::NotAnAtomicState {
            state: self.to_string(),
        })
    }

    /// The integer to store for a unit. Composites cannot be persisted.
    pub fn to_persisted(&self) -> Result<i64, StateError> {
        self.to_atomic_or_fail().map(|atomic| atomic.to_persisted())
    }
}

impl StateSet for ThingState {
    fn member_ids(&self) -> &[StateId] {
        match self {
            Self::Atomic(atomic) => atomic.member_ids(),
            Self::Composite(composite) => composite.member_ids(),
        }
    }
}

impl From<AtomicState> for ThingState {
    fn from(atomic: AtomicState) -> Self {
        Self::Atomic(atomic)
    }
}

impl From<CompositeState> for ThingState {
    fn from(composite: CompositeState) -> Self {
        Self::Composite(composite)
    }
}

impl TryFrom<ThingState> for AtomicState {
    type Error = StateError;

    fn try_from(state: ThingState) -> Result<Self, Self::Error> {
        state.to_atomic_or_fail()
    }
}

impl TryFrom<ThingState> for CompositeState {
    type Error = StateError;

    fn try_from(state: ThingState) -> Result<Self, Self::Error> {
        match state {
            ThingState::Composite(composite) => Ok(composite),
            ThingState::Atomic(atomic) => Err(StateError::NotACompositeState {
                state: atomic.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ThingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&warehouse::registry().render(self))
    }
}

impl FromStr for ThingState {
    type Err = StateError;

    /// Parse against the built-in warehouse catalog.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        warehouse::registry().parse(s)
    }
}

// ─── Union operator ─────────────────────────────────────────────────

impl<R: StateSet> BitOr<R> for AtomicState {
    type Output = CompositeState;

    fn bitor(self, rhs: R) -> CompositeState {
        self.union(&rhs)
    }
}

impl<R: StateSet> BitOr<R> for CompositeState {
    type Output = CompositeState;

    fn bitor(self, rhs: R) -> CompositeState {
        self.union(&rhs)
    }
}

impl<R: StateSet> BitOr<R> for &CompositeState {
    type Output = CompositeState;

    fn bitor(self, rhs: R) -> CompositeState {
        self.union(&rhs)
    }
}

impl<R: StateSet> BitOr<R> for ThingState {
    type Output = CompositeState;

    fn bitor(self, rhs: R) -> CompositeState {
        self.union(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::*;

    #[test]
    fn test_atomic_never_equals_singleton_composite() {
        let atomic = ThingState::from(WITH_CUSTOMER);
        let singleton = ThingState::from(WITH_CUSTOMER | WITH_CUSTOMER);
        assert_ne!(atomic, singleton);
        assert_eq!(atomic.member_ids(), singleton.member_ids());
    }

    #[test]
    fn test_union_of_atomic_with_itself_keeps_one_member() {
        let composite = union(&IN_BASKET, &IN_BASKET);
        assert_eq!(composite.len(), 1);
        assert!(composite.contains(IN_BASKET));
    }

    #[test]
    fn test_operator_matches_named_composite() {
        let combined = HELD_IN_SHELF_FOR_EXPORT | HELD_IN_SHELF_FOR_LOCAL;
        assert_eq!(&combined, HELD_IN_SHELF.state());
    }

    #[test]
    fn test_superset_and_overlap_across_kinds() {
        let in_shelf = IN_SHELF.state();
        assert!(in_shelf.is_superset_of(&AVAILABLE_IN_SHELF));
        assert!(in_shelf.is_superset_of(HELD_IN_SHELF.state()));
        assert!(!in_shelf.is_superset_of(&WITH_CUSTOMER));
        assert!(in_shelf.has_any_overlap(&(HELD_IN_SHELF_FOR_LOCAL | WITH_CUSTOMER)));
        assert!(!in_shelf.has_any_overlap(&WITH_CUSTOMER));
        assert!(AVAILABLE_IN_SHELF.is_superset_of(&AVAILABLE_IN_SHELF));
    }

    #[test]
    fn test_thing_state_superset_dispatches_on_members() {
        let query: ThingState = IN_TRANSPORT.state().clone().into();
        let unit: ThingState = IN_TRANSPORT_ASSIGNED.into();
        assert!(query.is_superset_of(&unit));
        assert!(!unit.is_superset_of(&query));
        assert!(unit.has_any_overlap(&query));
    }

    #[test]
    fn test_composite_cannot_be_persisted() {
        let state: ThingState = HELD_IN_SHELF.state().clone().into();
        let err = state.to_persisted().unwrap_err();
        assert_eq!(
            err,
            StateError::NotAnAtomicState {
                state: "HeldInShelf".into()
            }
        );
    }

    #[test]
    fn test_atomic_persists_its_id() {
        let state = ThingState::from(HELD_IN_SHELF_FOR_LOCAL);
        assert_eq!(state.to_persisted().unwrap(), 8_192);
        let narrowed = AtomicState::try_from(state).unwrap();
        assert_eq!(narrowed, HELD_IN_SHELF_FOR_LOCAL);
    }

    #[test]
    fn test_try_from_composite_rejects_atomic() {
        let err = CompositeState::try_from(ThingState::from(IN_NARNIA)).unwrap_err();
        assert!(matches!(err, StateError::NotACompositeState { .. }));
    }

    #[test]
    fn test_display_and_from_str_use_warehouse_catalog() {
        let parsed: ThingState = "HeldInShelf".parse().unwrap();
        assert_eq!(parsed.to_string(), "HeldInShelf");
        assert!("NotARealState".parse::<ThingState>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::warehouse;
    use proptest::prelude::*;

    fn atomic() -> impl Strategy<Value = AtomicState> {
        let atomics: Vec<AtomicState> = warehouse::registry().atomics().collect();
        prop::sample::select(atomics)
    }

    fn composite() -> impl Strategy<Value = CompositeState> {
        prop::collection::vec(atomic(), 1..12).prop_map(|atomics| {
            let first = atomics[0];
            atomics.iter().fold(first | first, |acc, a| acc | *a)
        })
    }

    fn thing_state() -> impl Strategy<Value = ThingState> {
        prop_oneof![
            atomic().prop_map(ThingState::from),
            composite().prop_map(ThingState::from),
        ]
    }

    proptest! {
        /// Union order never affects the result.
        #[test]
        fn union_is_commutative(a in thing_state(), b in thing_state()) {
            prop_assert_eq!(union(&a, &b), union(&b, &a));
        }

        /// Grouping of unions never affects the result.
        #[test]
        fn union_is_associative(a in thing_state(), b in thing_state(), c in thing_state()) {
            let left = union(&union(&a, &b), &c);
            let right = union(&a, &union(&b, &c));
            prop_assert_eq!(left, right);
        }

        /// Unioning a state with itself keeps exactly its own members.
        #[test]
        fn union_is_idempotent(a in thing_state()) {
            let doubled = union(&a, &a);
            prop_assert_eq!(doubled.member_ids(), a.member_ids());
        }

        /// Every state is a superset of itself.
        #[test]
        fn superset_is_reflexive(a in thing_state()) {
            prop_assert!(a.is_superset_of(&a));
        }

        /// A union contains both operands.
        #[test]
        fn union_is_superset_of_operands(a in thing_state(), b in thing_state()) {
            let u = union(&a, &b);
            prop_assert!(u.is_superset_of(&a));
            prop_assert!(u.is_superset_of(&b));
        }

        /// Two supersets of a common non-empty state overlap.
        #[test]
        fn common_subset_implies_overlap(x in atomic(), a in thing_state(), b in thing_state()) {
            let a = a | x;
            let b = b | x;
            prop_assert!(a.is_superset_of(&x) && b.is_superset_of(&x));
            prop_assert!(a.has_any_overlap(&b));
        }

        /// Overlap agrees with a naive intersection check.
        #[test]
        fn overlap_matches_naive_intersection(a in thing_state(), b in thing_state()) {
            let naive = a.member_ids().iter().any(|id| b.member_ids().contains(id));
            prop_assert_eq!(a.has_any_overlap(&b), naive);
        }
    }
}
