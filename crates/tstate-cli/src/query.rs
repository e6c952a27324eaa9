//! # Query Subcommands
//!
//! `union`, `superset` and `overlap`: the set algebra over state text.
//!
//! ```bash
//! tstate union HeldInShelfForExport HeldInShelfForLocal   # HeldInShelf
//! tstate superset InShelf HeldInShelf                     # true
//! tstate overlap InShelf WithCustomer                     # false
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tstate_core::{Registry, StateSet, ThingState};

use crate::inspect::{members_of, Member};
use crate::output::{emit, OutputFormat, Report};

/// Arguments for `union`.
#[derive(Args, Debug)]
pub struct UnionArgs {
    /// Two or more states to combine.
    #[arg(required = true, num_args = 2..)]
    pub states: Vec<String>,
}

/// Arguments for `superset` and `overlap`.
#[derive(Args, Debug)]
pub struct PairArgs {
    /// Left-hand state.
    pub left: String,
    /// Right-hand state.
    pub right: String,
}

fn parse_state(registry: &Registry, text: &str) -> Result<ThingState> {
    registry
        .parse(text)
        .with_context(|| format!("cannot parse {text:?} against the catalog"))
}

// ─── union ──────────────────────────────────────────────────────────

/// Result of `union`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionReport {
    pub state: String,
    pub members: Vec<Member>,
}

/// Union every state in `texts`.
pub fn union_report(registry: &Registry, texts: &[String]) -> Result<UnionReport> {
    let states = texts
        .iter()
        .map(|text| parse_state(registry, text))
        .collect::<Result<Vec<_>>>()?;
    let Some((first, rest)) = states.split_first() else {
        anyhow::bail!("union needs at least one state");
    };

    let combined = rest
        .iter()
        .fold(first.union(first), |acc, state| acc.union(state));
    let combined = ThingState::from(combined);
    Ok(UnionReport {
        state: registry.render(&combined),
        members: members_of(registry, &combined),
    })
}

impl Report for UnionReport {
    fn to_text(&self) -> String {
        self.state.clone()
    }
}

/// Execute `union`.
pub fn run_union(args: &UnionArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    let report = union_report(registry, &args.states)?;
    emit(&report, format)?;
    Ok(0)
}

// ─── superset / overlap ─────────────────────────────────────────────

/// Answer to a yes/no set query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub result: bool,
}

impl Report for Answer {
    fn to_text(&self) -> String {
        self.result.to_string()
    }
}

/// Whether `left` contains every member of `right`.
pub fn superset(registry: &Registry, left: &str, right: &str) -> Result<Answer> {
    let left = parse_state(registry, left)?;
    let right = parse_state(registry, right)?;
    Ok(Answer {
        result: left.is_superset_of(&right),
    })
}

/// Whether `left` and `right` share a member.
pub fn overlap(registry: &Registry, left: &str, right: &str) -> Result<Answer> {
    let left = parse_state(registry, left)?;
    let right = parse_state(registry, right)?;
    Ok(Answer {
        result: left.has_any_overlap(&right),
    })
}

/// Execute `superset`.
pub fn run_superset(args: &PairArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    emit(&superset(registry, &args.left, &args.right)?, format)?;
    Ok(0)
}

/// Execute `overlap`.
pub fn run_overlap(args: &PairArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    emit(&overlap(registry, &args.left, &args.right)?, format)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tstate_core::warehouse;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn union_resolves_to_named_composite() {
        let report = union_report(
            warehouse::registry(),
            &texts(&["HeldInShelfForLocal", "HeldInShelfForExport"]),
        )
        .unwrap();
        assert_eq!(report.state, "HeldInShelf");
        assert_eq!(report.members.len(), 2);
    }

    #[test]
    fn union_of_composite_and_atomic_is_anonymous() {
        let report =
            union_report(warehouse::registry(), &texts(&["InTransport", "WithCustomer"])).unwrap();
        assert_eq!(
            report.state,
            "InTransportAssigned|WithCustomer|InTransportPreviouslyAssigned"
        );
    }

    #[test]
    fn union_of_duplicates_keeps_composite_kind() {
        let report = union_report(warehouse::registry(), &texts(&["InNarnia", "InNarnia"])).unwrap();
        assert_eq!(report.state, "InNarnia|InNarnia");
    }

    #[test]
    fn union_reports_bad_operand() {
        let err = union_report(warehouse::registry(), &texts(&["InNarnia", "Atlantis"])).unwrap_err();
        assert!(err.to_string().contains("\"Atlantis\""));
    }

    #[test]
    fn superset_and_overlap_answers() {
        let registry = warehouse::registry();
        assert!(superset(registry, "InShelf", "HeldInShelf").unwrap().result);
        assert!(!superset(registry, "HeldInShelf", "InShelf").unwrap().result);
        assert!(superset(registry, "InNarnia", "InNarnia").unwrap().result);
        assert!(overlap(registry, "InShelf", "HeldInShelfForLocal|WithCustomer").unwrap().result);
        assert!(!overlap(registry, "InShelf", "WithCustomer").unwrap().result);
    }
}
