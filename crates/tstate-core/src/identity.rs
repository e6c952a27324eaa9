//! # State Identity
//!
//! The persisted representation of a unit's state is a single signed
//! 64-bit integer. [`StateId`] wraps it so ids cannot be confused with
//! other integers flowing through the surrounding application.
//!
//! Ids are opaque. Some catalog entries carry values that were once bit
//! positions, others are small sequential integers; only uniqueness
//! within a catalog matters.

use serde::{Deserialize, Serialize};

/// Identity of an atomic state as stored by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(i64);

impl StateId {
    /// Wrap a raw persisted value. No catalog validation happens here.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw persisted value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<StateId> for i64 {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
