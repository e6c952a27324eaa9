//! # Inspect Subcommands
//!
//! `show`, `parse` and `id`: look up a single state in the catalog.
//!
//! ## Usage
//!
//! ```bash
//! # Declaration tree of a named state:
//! tstate show HasShelfContext
//!
//! # Canonical form of arbitrary state text:
//! tstate parse "InNarnia | InGraveyard"
//!
//! # Validate a persisted id:
//! tstate id 4096
//! ```

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use tstate_core::{AtomicState, Registry, ThingState};

use crate::output::{emit, OutputFormat, Report};

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Atomic or named composite state.
    pub name: String,
}

/// Arguments for `parse`.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// State text: a catalog name or `|`-joined atomic names.
    pub text: String,
}

/// Arguments for `id`.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Persisted state id.
    #[arg(allow_negative_numbers = true)]
    pub id: i64,
}

// ─── show ───────────────────────────────────────────────────────────

/// One node of a declaration tree. Atomics carry their id; composites
/// carry their declared members, unflattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<DeclarationNode>,
}

/// Build the declaration tree of `name`.
pub fn declaration_tree(registry: &Registry, name: &str) -> Result<DeclarationNode> {
    if let Some(atomic) = registry.atomic_by_name(name) {
        return Ok(DeclarationNode {
            name: name.to_string(),
            id: Some(atomic.to_persisted()),
            members: Vec::new(),
        });
    }
    let Some(declared) = registry.declared_members(name) else {
        bail!("no state named {name:?} in the catalog");
    };
    let members = declared
        .iter()
        .map(|member| declaration_tree(registry, member))
        .collect::<Result<Vec<_>>>()?;
    Ok(DeclarationNode {
        name: name.to_string(),
        id: None,
        members,
    })
}

impl DeclarationNode {
    fn write_indented(&self, depth: usize, out: &mut Vec<String>) {
        let prefix = match depth {
            0 => String::new(),
            n => format!("{}├───", "│   ".repeat(n - 1)),
        };
        match self.id {
            Some(id) => out.push(format!("{prefix}{} => {id}", self.name)),
            None => out.push(format!("{prefix}{}", self.name)),
        }
        for member in &self.members {
            member.write_indented(depth + 1, out);
        }
    }
}

impl Report for DeclarationNode {
    fn to_text(&self) -> String {
        let mut lines = Vec::new();
        self.write_indented(0, &mut lines);
        lines.join("\n")
    }
}

/// Execute `show`.
pub fn run_show(args: &ShowArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    let tree = declaration_tree(registry, args.name.trim())?;
    emit(&tree, format)?;
    Ok(0)
}

// ─── parse ──────────────────────────────────────────────────────────

/// An atomic member of a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub id: i64,
}

impl Member {
    fn of(registry: &Registry, atomic: AtomicState) -> Self {
        Self {
            name: registry.name_of(atomic).into_owned(),
            id: atomic.to_persisted(),
        }
    }
}

/// Atomic members of `state` in canonical order.
pub fn members_of(registry: &Registry, state: &ThingState) -> Vec<Member> {
    match state {
        ThingState::Atomic(atomic) => vec![Member::of(registry, *atomic)],
        ThingState::Composite(composite) => composite
            .atomics()
            .map(|atomic| Member::of(registry, atomic))
            .collect(),
    }
}

/// Whether a parsed state is atomic or composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Atomic,
    Composite,
}

/// Result of `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub canonical: String,
    pub kind: StateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted_id: Option<i64>,
    pub members: Vec<Member>,
}

/// Parse `text` against `registry` and describe the result.
pub fn parse_report(registry: &Registry, text: &str) -> Result<ParseReport> {
    let state = registry
        .parse(text)
        .with_context(|| format!("cannot parse {text:?} against the catalog"))?;
    let (kind, persisted_id) = match &state {
        ThingState::Atomic(atomic) => (StateKind::Atomic, Some(atomic.to_persisted())),
        ThingState::Composite(_) => (StateKind::Composite, None),
    };
    Ok(ParseReport {
        canonical: registry.render(&state),
        kind,
        persisted_id,
        members: members_of(registry, &state),
    })
}

impl Report for ParseReport {
    fn to_text(&self) -> String {
        let header = match self.persisted_id {
            Some(id) => format!("{} (atomic, persisted as {id})", self.canonical),
            None => format!(
                "{} (composite, {} member{})",
                self.canonical,
                self.members.len(),
                if self.members.len() == 1 { "" } else { "s" }
            ),
        };
        if self.kind == StateKind::Atomic {
            return header;
        }
        let mut lines = vec![header];
        lines.extend(
            self.members
                .iter()
                .map(|member| format!("  {} => {}", member.name, member.id)),
        );
        lines.join("\n")
    }
}

/// Execute `parse`.
pub fn run_parse(args: &ParseArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    let report = parse_report(registry, &args.text)?;
    emit(&report, format)?;
    Ok(0)
}

// ─── id ─────────────────────────────────────────────────────────────

/// Result of `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdReport {
    pub id: i64,
    pub name: String,
    pub deprecated: bool,
}

/// Validate a persisted id against `registry`.
pub fn id_report(registry: &Registry, id: i64) -> Result<IdReport> {
    let atomic = registry.atomic(id)?;
    Ok(IdReport {
        id,
        name: registry.name_of(atomic).into_owned(),
        deprecated: registry.is_deprecated(atomic),
    })
}

impl Report for IdReport {
    fn to_text(&self) -> String {
        let suffix = if self.deprecated { " (deprecated)" } else { "" };
        format!("{} => {}{suffix}", self.id, self.name)
    }
}

/// Execute `id`.
pub fn run_id(args: &IdArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    let report = id_report(registry, args.id)?;
    if report.deprecated {
        tracing::warn!(id = report.id, name = %report.name, "state is deprecated");
    }
    emit(&report, format)?;
    Ok(0)
}
