//! Serde helpers storing an [`AtomicState`] as its persisted integer id
//! instead of its name.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use tstate_core::AtomicState;
//!
//! #[derive(Serialize, Deserialize)]
//! struct ThingRow {
//!     thing_id: u64,
//!     #[serde(with = "tstate_core::persisted")]
//!     state: AtomicState,
//! }
//! ```
//!
//! Deserialization validates the id against the warehouse catalog.

use serde::{de, Deserialize, Deserializer, Serializer};

use crate::atomic::AtomicState;

/// Write the persisted id.
pub fn serialize<S>(state: &AtomicState, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(state.to_persisted())
}

/// Read and validate a persisted id.
pub fn deserialize<'de, D>(deserializer: D) -> Result<AtomicState, D::Error>
where
    D: Deserializer<'de>,
{
    let id = i64::deserialize(deserializer)?;
    AtomicState::from_persisted(id).map_err(de::Error::custom)
}
