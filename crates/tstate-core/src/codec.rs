//! # Text Codec
//!
//! Parses and renders thing states for boundaries that cannot carry the
//! typed value: API payloads, admin tooling, logs.
//!
//! ## Format
//!
//! A state is written either as a single catalog name (atomic or named
//! composite) or as `|`-joined atomic names:
//!
//! ```text
//! HeldInShelfForExport                     atomic
//! HeldInShelf                              named composite
//! InNarnia|InGraveyard                     anonymous composite
//! ```
//!
//! Anonymous composites render their members in canonical (id) order, so
//! rendering is deterministic. A one-member anonymous composite renders its
//! member twice (`InNarnia|InNarnia`), since a lone name parses as the
//! atomic state. `parse(render(s)) == s` holds for every state.
//!
//! ## Serde
//!
//! [`AtomicState`], [`CompositeState`] and [`ThingState`] serialize as this
//! text against the warehouse catalog. Deserialization validates: unknown
//! text is rejected, and text of the wrong kind is rejected.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::atomic::AtomicState;
use crate::composite::CompositeState;
use crate::error::StateError;
use crate::registry::Registry;
use crate::state::ThingState;
use crate::warehouse;

/// Separator between atomic names in an anonymous composite.
pub const DELIMITER: &str = "|";

impl Registry {
    /// Parse state text against this catalog.
    ///
    /// Resolution order: atomic name, named composite, then a list of two
    /// or more `|`-separated atomic names. Whitespace around the text and
    /// around each part is ignored.
    ///
    /// # Errors
    ///
    /// [`StateError::UnparseableStateText`] for anything else. No partial
    /// result is produced.
    pub fn parse(&self, text: &str) -> Result<ThingState, StateError> {
        let trimmed = text.trim();
        if let Some(atomic) = self.atomic_by_name(trimmed) {
            return Ok(atomic.into());
        }
        if let Some(composite) = self.composite_by_name(trimmed) {
            return Ok(composite.clone().into());
        }

        let unparseable = || StateError::UnparseableStateText {
            text: text.to_string(),
        };
        let parts: Vec<&str> = trimmed.split(DELIMITER).map(str::trim).collect();
        if parts.len() < 2 {
            tracing::trace!(text = %text, "state text matched no catalog name");
            return Err(unparseable());
        }

        let ids = parts
            .iter()
            .map(|part| self.atomic_by_name(part).map(|atomic| atomic.id()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(unparseable)?;
        Ok(CompositeState::from_ids(ids).into())
    }

    /// Render any state as text.
    pub fn render(&self, state: &ThingState) -> String {
        match state {
            ThingState::Atomic(atomic) => self.name_of(*atomic).into_owned(),
            ThingState::Composite(composite) => self.render_composite(composite),
        }
    }

    /// Render a composite: its registered name if it has one, otherwise the
    /// canonical `|`-joined member names.
    pub fn render_composite(&self, composite: &CompositeState) -> String {
        if let Some(name) = self.composite_name(composite) {
            return name.to_string();
        }

        let names: Vec<_> = composite
            .atomics()
            .map(|atomic| self.name_of(atomic))
            .collect();
        match names.as_slice() {
            [only] => format!("{only}{DELIMITER}{only}"),
            _ => names.join(DELIMITER),
        }
    }
}

/// Text serialization for state types. Deserializes as a plain `String`,
/// parses it against the warehouse catalog, then narrows to the target type
/// so the wrong kind of state is rejected at deserialization time.
macro_rules! impl_text_serde {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                let state = warehouse::registry()
                    .parse(&raw)
                    .map_err(de::Error::custom)?;
                $ty::try_from(state).map_err(de::Error::custom)
            }
        }
    };
}

impl_text_serde!(AtomicState);
impl_text_serde!(CompositeState);
impl_text_serde!(ThingState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateSet;
    use crate::warehouse::*;

    fn parse(text: &str) -> Result<ThingState, StateError> {
        registry().parse(text)
    }

    #[test]
    fn test_parse_atomic_name() {
        assert_eq!(
            parse("HeldInShelfForExport").unwrap(),
            ThingState::from(HELD_IN_SHELF_FOR_EXPORT)
        );
    }

    #[test]
    fn test_parse_named_composite() {
        let parsed = parse("HeldInShelf").unwrap();
        let expected: ThingState = (HELD_IN_SHELF_FOR_EXPORT | HELD_IN_SHELF_FOR_LOCAL).into();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_pipe_list_is_order_independent() {
        let a = parse("HeldInShelfForExport|HeldInShelfForLocal").unwrap();
        let b = parse("HeldInShelfForLocal|HeldInShelfForExport").unwrap();
        assert_eq!(a, b);
        assert!(a.is_composite());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse("  InNarnia ").unwrap(), ThingState::from(IN_NARNIA));
        assert_eq!(
            parse("InNarnia | InGraveyard").unwrap(),
            parse("InGraveyard|InNarnia").unwrap()
        );
    }

    #[test]
    fn test_parse_failures() {
        for text in [
            "NotARealState",
            "",
            "InNarnia|NotARealState",
            "InNarnia|",
            "|",
            "HeldInShelf|InNarnia",
        ] {
            assert_eq!(
                parse(text).unwrap_err(),
                StateError::UnparseableStateText {
                    text: text.to_string()
                },
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_render_named_and_anonymous() {
        let registry = registry();
        assert_eq!(registry.render(&HELD_IN_SHELF_FOR_LOCAL.into()), "HeldInShelfForLocal");
        assert_eq!(
            registry.render(&(HELD_IN_SHELF_FOR_LOCAL | HELD_IN_SHELF_FOR_EXPORT).into()),
            "HeldInShelf"
        );
        assert_eq!(
            registry.render(&(WITH_CUSTOMER | IN_JUNKYARD | IN_INCOMING_ZONE).into()),
            "InIncomingZone|InJunkyard|WithCustomer"
        );
    }

    #[test]
    fn test_singleton_composite_round_trips() {
        let singleton: ThingState = (IN_NARNIA | IN_NARNIA).into();
        let text = registry().render(&singleton);
        assert_eq!(text, "InNarnia|InNarnia");
        assert_eq!(parse(&text).unwrap(), singleton);
    }

    #[test]
    fn test_named_singleton_composite_renders_its_name() {
        let alias: ThingState = IN_CARTON_UNSHELVED_BUT_SPACE_ASSIGNED.state().clone().into();
        assert_eq!(alias.to_string(), "InCartonUnshelvedButSpaceAssigned");
        assert_eq!(alias.member_ids(), IN_CARTON_TRANSFER_ZONE_WITH_SHELF_ASSIGNMENT.member_ids());
        assert_ne!(alias, ThingState::from(IN_CARTON_TRANSFER_ZONE_WITH_SHELF_ASSIGNMENT));
    }

    #[test]
    fn test_serde_thing_state_as_text() {
        let state: ThingState = HELD_IN_SHELF.state().clone().into();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"HeldInShelf\"");
        let back: ThingState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_serde_atomic_rejects_composite_text() {
        let err = serde_json::from_str::<AtomicState>("\"HeldInShelf\"").unwrap_err();
        assert!(err.to_string().contains("not an atomic thing state"));
        let ok: AtomicState = serde_json::from_str("\"WithCustomer\"").unwrap();
        assert_eq!(ok, WITH_CUSTOMER);
    }

    #[test]
    fn test_serde_composite_rejects_atomic_text() {
        assert!(serde_json::from_str::<CompositeState>("\"WithCustomer\"").is_err());
        let ok: CompositeState = serde_json::from_str("\"InNarnia|InGraveyard\"").unwrap();
        assert_eq!(ok, IN_NARNIA | IN_GRAVEYARD);
    }

    #[test]
    fn test_serde_rejects_unknown_text() {
        let err = serde_json::from_str::<ThingState>("\"NotARealState\"").unwrap_err();
        assert!(err.to_string().contains("unparseable state text"));
    }
}
