//! # Composite State
//!
//! An immutable set of atomic states. The members are held in canonical
//! form (ascending by id, duplicates removed) so derived equality and
//! hashing are structural: two composites built in different union orders
//! compare equal and hash identically.
//!
//! Set queries walk both canonical sequences once, giving
//! O(|self| + |other|) superset and overlap checks without allocating a
//! lookup table per call.

use std::sync::Arc;

use crate::atomic::AtomicState;
use crate::identity::StateId;
use crate::state::StateSet;
use crate::warehouse;

/// A named or anonymous set of atomic states.
///
/// Built by union (see [`StateSet::union`] and the `|` operator) or by
/// resolving a named composite from a [`crate::Registry`]. A composite with
/// a single member is still a composite and cannot be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeState {
    members: Arc<[StateId]>,
}

impl CompositeState {
    /// Wrap ids that are already sorted ascending and distinct.
    pub(crate) fn from_canonical(members: Vec<StateId>) -> Self {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        Self {
            members: members.into(),
        }
    }

    /// Canonicalize an arbitrary collection of member ids.
    pub(crate) fn from_ids(ids: impl IntoIterator<Item = StateId>) -> Self {
        let mut members: Vec<StateId> = ids.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self::from_canonical(members)
    }

    /// Number of distinct atomic members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the composite has no members. Never true for composites
    /// produced by union or by a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in canonical order.
    pub fn ids(&self) -> &[StateId] {
        &self.members
    }

    /// Whether `atomic` is a member.
    pub fn contains(&self, atomic: AtomicState) -> bool {
        self.members.binary_search(&atomic.id()).is_ok()
    }

    /// Members as atomic states, in canonical order.
    pub fn atomics(&self) -> impl Iterator<Item = AtomicState> + '_ {
        self.members.iter().map(|id| AtomicState::declare(id.get()))
    }
}

impl StateSet for CompositeState {
    fn member_ids(&self) -> &[StateId] {
        &self.members
    }
}

impl std::fmt::Display for CompositeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&warehouse::registry().render_composite(self))
    }
}

// ─── Canonical sequence walks ───────────────────────────────────────

/// Sorted, deduplicated merge of two canonical sequences.
pub(crate) fn merge(a: &[StateId], b: &[StateId]) -> Vec<StateId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Whether every id of `sub` appears in `sup`. Both must be canonical.
pub(crate) fn contains_all(sup: &[StateId], sub: &[StateId]) -> bool {
    let mut i = 0;
    for id in sub {
        while i < sup.len() && sup[i] < *id {
            i += 1;
        }
        if i == sup.len() || sup[i] != *id {
            return false;
        }
        i += 1;
    }
    true
}

/// Whether two canonical sequences share an id.
pub(crate) fn intersects(a: &[StateId], b: &[StateId]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::*;
    use std::collections::HashSet;

    fn ids(raw: &[i64]) -> Vec<StateId> {
        raw.iter().copied().map(StateId::new).collect()
    }

    #[test]
    fn test_merge_dedupes_and_sorts() {
        assert_eq!(merge(&ids(&[1, 4, 9]), &ids(&[2, 4, 10])), ids(&[1, 2, 4, 9, 10]));
        assert_eq!(merge(&ids(&[]), &ids(&[3])), ids(&[3]));
    }

    #[test]
    fn test_contains_all() {
        assert!(contains_all(&ids(&[1, 2, 3, 5]), &ids(&[2, 5])));
        assert!(!contains_all(&ids(&[1, 2, 3]), &ids(&[2, 4])));
        assert!(!contains_all(&ids(&[1]), &ids(&[1, 2])));
        assert!(contains_all(&ids(&[1]), &ids(&[])));
    }

    #[test]
    fn test_intersects() {
        assert!(intersects(&ids(&[1, 8, 20]), &ids(&[3, 20])));
        assert!(!intersects(&ids(&[1, 8]), &ids(&[2, 9])));
        assert!(!intersects(&ids(&[]), &ids(&[2])));
    }

    #[test]
    fn test_from_ids_canonicalizes() {
        let composite = CompositeState::from_ids(ids(&[13, 12, 13, 3]));
        assert_eq!(composite.ids(), ids(&[3, 12, 13]).as_slice());
    }

    #[test]
    fn test_construction_order_does_not_affect_equality_or_hash() {
        let a = HELD_IN_SHELF_FOR_EXPORT | HELD_IN_SHELF_FOR_LOCAL | WITH_CUSTOMER;
        let b = WITH_CUSTOMER | (HELD_IN_SHELF_FOR_LOCAL | HELD_IN_SHELF_FOR_EXPORT);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_contains_and_atomics() {
        let composite = IN_TRANSPORT.state();
        assert!(composite.contains(IN_TRANSPORT_ASSIGNED));
        assert!(!composite.contains(IN_BASKET));
        let members: Vec<AtomicState> = composite.atomics().collect();
        assert_eq!(members, vec![IN_TRANSPORT_ASSIGNED, IN_TRANSPORT_PREVIOUSLY_ASSIGNED]);
    }

    #[test]
    fn test_display_prefers_registered_name() {
        assert_eq!((IN_TRANSPORT_ASSIGNED | IN_TRANSPORT_PREVIOUSLY_ASSIGNED).to_string(), "InTransport");
        assert_eq!((IN_NARNIA | IN_GRAVEYARD).to_string(), "InNarnia|InGraveyard");
    }
}
