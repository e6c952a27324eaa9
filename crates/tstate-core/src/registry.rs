//! # Registry: Name Resolution Tables
//!
//! Derived, read-only lookup tables built once from a [`Catalog`]:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | atomics by name | name | [`AtomicState`] |
//! | names by id | [`StateId`] | name |
//! | composites by name | name | [`CompositeState`] |
//! | names by composite | [`CompositeState`] | first declared name |
//!
//! Building runs in two phases. Phase 1 registers every atomic and checks
//! names and ids. Phase 2 resolves each composite strictly from atomics and
//! composites registered before it. Any inconsistency is a
//! [`CatalogIntegrityViolation`]; nothing is tolerated silently, since
//! [`Registry::atomic`] validation depends on these tables being exact.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::atomic::AtomicState;
use crate::catalog::{AtomicDefinition, Catalog, CompositeDefinition};
use crate::composite::CompositeState;
use crate::error::{CatalogIntegrityViolation, StateError};
use crate::identity::StateId;

/// Lookup tables for one catalog. Immutable once built.
#[derive(Debug, Clone)]
pub struct Registry {
    atomics_by_name: HashMap<String, AtomicState>,
    names_by_id: HashMap<StateId, String>,
    composites_by_name: HashMap<String, CompositeState>,
    names_by_composite: HashMap<CompositeState, String>,
    atomic_order: Vec<AtomicState>,
    composite_order: Vec<String>,
    declared_members: HashMap<String, Vec<String>>,
    deprecated: HashSet<StateId>,
}

impl Registry {
    /// Build the lookup tables for `catalog`.
    ///
    /// # Errors
    ///
    /// Any [`CatalogIntegrityViolation`]: duplicate names or ids, invalid
    /// names, negative ids, empty composites, or composites referencing a
    /// state not declared before them.
    pub fn build(catalog: &Catalog) -> Result<Self, CatalogIntegrityViolation> {
        let mut registry = Self::empty(catalog);
        let result = catalog
            .atomic
            .iter()
            .try_for_each(|def| registry.register_atomic(def))
            .and_then(|()| {
                catalog
                    .composite
                    .iter()
                    .try_for_each(|def| registry.register_composite(def))
            });

        match result {
            Ok(()) => {
                tracing::debug!(
                    atomics = registry.atomic_order.len(),
                    composites = registry.composite_order.len(),
                    deprecated = registry.deprecated.len(),
                    "thing-state registry built"
                );
                Ok(registry)
            }
            Err(violation) => {
                tracing::error!(%violation, "thing-state catalog rejected");
                Err(violation)
            }
        }
    }

    fn empty(catalog: &Catalog) -> Self {
        let atomics = catalog.atomic.len();
        let composites = catalog.composite.len();
        Self {
            atomics_by_name: HashMap::with_capacity(atomics),
            names_by_id: HashMap::with_capacity(atomics),
            composites_by_name: HashMap::with_capacity(composites),
            names_by_composite: HashMap::with_capacity(composites),
            atomic_order: Vec::with_capacity(atomics),
            composite_order: Vec::with_capacity(composites),
            declared_members: HashMap::with_capacity(composites),
            deprecated: HashSet::new(),
        }
    }

    fn register_atomic(&mut self, def: &AtomicDefinition) -> Result<(), CatalogIntegrityViolation> {
        self.check_new_name(&def.name)?;
        if def.id < 0 {
            return Err(CatalogIntegrityViolation::NegativeId {
                name: def.name.clone(),
                id: def.id,
            });
        }
        let id = StateId::new(def.id);
        if let Some(first) = self.names_by_id.get(&id) {
            return Err(CatalogIntegrityViolation::DuplicateId {
                id: def.id,
                first: first.clone(),
                second: def.name.clone(),
            });
        }

        let atomic = AtomicState::declare(def.id);
        self.atomics_by_name.insert(def.name.clone(), atomic);
        self.names_by_id.insert(id, def.name.clone());
        self.atomic_order.push(atomic);
        if def.deprecated {
            self.deprecated.insert(id);
        }
        Ok(())
    }

    fn register_composite(&mut self, def: &CompositeDefinition) -> Result<(), CatalogIntegrityViolation> {
        self.check_new_name(&def.name)?;
        if def.members.is_empty() {
            return Err(CatalogIntegrityViolation::EmptyComposite {
                name: def.name.clone(),
            });
        }

        let mut ids = Vec::new();
        for member in &def.members {
            if let Some(atomic) = self.atomics_by_name.get(member) {
                ids.push(atomic.id());
            } else if let Some(composite) = self.composites_by_name.get(member) {
                ids.extend_from_slice(composite.ids());
            } else {
                return Err(CatalogIntegrityViolation::UnresolvedMember {
                    composite: def.name.clone(),
                    member: member.clone(),
                });
            }
        }

        let composite = CompositeState::from_ids(ids);
        self.names_by_composite
            .entry(composite.clone())
            .or_insert_with(|| def.name.clone());
        self.composites_by_name.insert(def.name.clone(), composite);
        self.composite_order.push(def.name.clone());
        self.declared_members
            .insert(def.name.clone(), def.members.clone());
        Ok(())
    }

    fn check_new_name(&self, name: &str) -> Result<(), CatalogIntegrityViolation> {
        if name.is_empty() || name.contains('|') || name.chars().any(char::is_whitespace) {
            return Err(CatalogIntegrityViolation::InvalidName {
                name: name.to_string(),
            });
        }
        if self.atomics_by_name.contains_key(name) || self.composites_by_name.contains_key(name) {
            return Err(CatalogIntegrityViolation::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Construct an atomic state from a raw id declared in this catalog.
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidStateIdentity`] if `id` is not declared.
    pub fn atomic(&self, id: i64) -> Result<AtomicState, StateError> {
        if self.contains_id(id) {
            Ok(AtomicState::declare(id))
        } else {
            Err(StateError::InvalidStateIdentity { id })
        }
    }

    /// Whether `id` is a declared atomic state.
    pub fn contains_id(&self, id: i64) -> bool {
        self.names_by_id.contains_key(&StateId::new(id))
    }

    /// The atomic state registered under `name`.
    pub fn atomic_by_name(&self, name: &str) -> Option<AtomicState> {
        self.atomics_by_name.get(name).copied()
    }

    /// The composite registered under `name`.
    pub fn composite_by_name(&self, name: &str) -> Option<&CompositeState> {
        self.composites_by_name.get(name)
    }

    /// The catalog name of `atomic`.
    pub fn atomic_name(&self, atomic: AtomicState) -> Option<&str> {
        self.names_by_id.get(&atomic.id()).map(String::as_str)
    }

    /// The first declared name whose members equal `composite`'s.
    pub fn composite_name(&self, composite: &CompositeState) -> Option<&str> {
        self.names_by_composite.get(composite).map(String::as_str)
    }

    /// The catalog name of `atomic`, or an `Unknown State` placeholder.
    pub fn name_of(&self, atomic: AtomicState) -> Cow<'_, str> {
        match self.atomic_name(atomic) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Unknown State: {}", atomic.id())),
        }
    }

    /// Member names of a named composite exactly as declared (atomics and
    /// composites, unflattened).
    pub fn declared_members(&self, composite_name: &str) -> Option<&[String]> {
        self.declared_members.get(composite_name).map(Vec::as_slice)
    }

    /// Whether `atomic` is retired.
    pub fn is_deprecated(&self, atomic: AtomicState) -> bool {
        self.deprecated.contains(&atomic.id())
    }

    /// Atomic states in declaration order.
    pub fn atomics(&self) -> impl Iterator<Item = AtomicState> + '_ {
        self.atomic_order.iter().copied()
    }

    /// Named composites in declaration order.
    pub fn composites(&self) -> impl Iterator<Item = (&str, &CompositeState)> + '_ {
        self.composite_order.iter().filter_map(|name| {
            self.composites_by_name
                .get(name)
                .map(|composite| (name.as_str(), composite))
        })
    }

    /// Number of atomic states.
    pub fn atomic_count(&self) -> usize {
        self.atomic_order.len()
    }

    /// Number of named composites, aliases included.
    pub fn composite_count(&self) -> usize {
        self.composite_order.len()
    }

    /// Reconstruct the declaration table this registry was built from.
    pub fn to_catalog(&self) -> Catalog {
        let atomic = self
            .atomics()
            .map(|atomic| AtomicDefinition {
                name: self.name_of(atomic).into_owned(),
                id: atomic.to_persisted(),
                deprecated: self.is_deprecated(atomic),
            })
            .collect();
        let composite = self
            .composite_order
            .iter()
            .map(|name| CompositeDefinition {
                name: name.clone(),
                members: self.declared_members(name).map(<[String]>::to_vec).unwrap_or_default(),
            })
            .collect();
        Catalog { atomic, composite }
    }
}
