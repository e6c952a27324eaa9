//! # Catalog Subcommands
//!
//! Listing, export and verification of the active catalog (built-in or
//! loaded with `--catalog`).
//!
//! ```bash
//! tstate catalog list
//! tstate catalog export --out warehouse.yaml
//! tstate --format json catalog export
//! tstate --catalog warehouse.yaml catalog verify
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use tstate_core::Registry;

use crate::output::{emit, OutputFormat, Report};

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Available catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List every atomic state and named composite in declaration order.
    List,

    /// Write the declaration table as YAML, or JSON with `--format json`.
    Export {
        /// Destination file. Defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check the catalog and report composites shadowed by an earlier
    /// declaration with the same members.
    Verify,
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, registry: &Registry, format: OutputFormat) -> Result<u8> {
    match &args.command {
        CatalogCommand::List => {
            emit(&listing(registry), format)?;
            Ok(0)
        }
        CatalogCommand::Export { out } => run_export(registry, format, out.as_ref()),
        CatalogCommand::Verify => {
            let report = verify(registry);
            for shadow in &report.shadowed {
                tracing::info!(
                    composite = %shadow.name,
                    renders_as = %shadow.renders_as,
                    "composite shares its members with an earlier declaration"
                );
            }
            emit(&report, format)?;
            Ok(0)
        }
    }
}

// ─── list ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomicEntry {
    pub name: String,
    pub id: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeEntry {
    pub name: String,
    /// Number of distinct atomic members after flattening.
    pub size: usize,
}

/// Result of `catalog list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub atomic: Vec<AtomicEntry>,
    pub composite: Vec<CompositeEntry>,
}

/// Every catalog entry in declaration order.
pub fn listing(registry: &Registry) -> Listing {
    let atomic = registry
        .atomics()
        .map(|state| AtomicEntry {
            name: registry.name_of(state).into_owned(),
            id: state.to_persisted(),
            deprecated: registry.is_deprecated(state),
        })
        .collect();
    let composite = registry
        .composites()
        .map(|(name, state)| CompositeEntry {
            name: name.to_string(),
            size: state.len(),
        })
        .collect();
    Listing { atomic, composite }
}

impl Report for Listing {
    fn to_text(&self) -> String {
        let width = self
            .atomic
            .iter()
            .map(|entry| entry.name.len())
            .chain(self.composite.iter().map(|entry| entry.name.len()))
            .max()
            .unwrap_or(0);

        let mut lines = vec![format!("Atomic states ({}):", self.atomic.len())];
        for entry in &self.atomic {
            let note = if entry.deprecated { "  (deprecated)" } else { "" };
            lines.push(format!("  {:<width$}  {}{note}", entry.name, entry.id));
        }
        lines.push(String::new());
        lines.push(format!("Composite states ({}):", self.composite.len()));
        for entry in &self.composite {
            lines.push(format!("  {:<width$}  {} members", entry.name, entry.size));
        }
        lines.join("\n")
    }
}

// ─── export ─────────────────────────────────────────────────────────

/// Serialize the declaration table of `registry`. Text format is YAML.
pub fn export(registry: &Registry, format: OutputFormat) -> Result<String> {
    let catalog = registry.to_catalog();
    match format {
        OutputFormat::Text => {
            serde_yaml::to_string(&catalog).context("failed to serialize catalog as YAML")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&catalog)
            .map(|json| json + "\n")
            .context("failed to serialize catalog as JSON"),
    }
}

fn run_export(registry: &Registry, format: OutputFormat, out: Option<&PathBuf>) -> Result<u8> {
    let content = export(registry, format)?;
    match out {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("failed to write catalog: {}", path.display()))?;
            tracing::info!(path = %path.display(), "catalog exported");
        }
        None => print!("{content}"),
    }
    Ok(0)
}

// ─── verify ─────────────────────────────────────────────────────────

/// A named composite whose members equal those of an earlier composite,
/// so it renders under the earlier name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shadowed {
    pub name: String,
    pub renders_as: String,
}

/// Result of `catalog verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub atomic: usize,
    pub composite: usize,
    pub deprecated: usize,
    pub shadowed: Vec<Shadowed>,
}

/// Summarize an already-built (and therefore consistent) registry.
pub fn verify(registry: &Registry) -> VerifyReport {
    let shadowed = registry
        .composites()
        .filter_map(|(name, state)| {
            let renders_as = registry.render_composite(state);
            (renders_as != name).then(|| Shadowed {
                name: name.to_string(),
                renders_as,
            })
        })
        .collect();
    VerifyReport {
        atomic: registry.atomic_count(),
        composite: registry.composite_count(),
        deprecated: registry
            .atomics()
            .filter(|state| registry.is_deprecated(*state))
            .count(),
        shadowed,
    }
}

impl Report for VerifyReport {
    fn to_text(&self) -> String {
        let mut lines = vec![format!(
            "catalog ok: {} atomic states ({} deprecated), {} composites",
            self.atomic, self.deprecated, self.composite
        )];
        for shadow in &self.shadowed {
            lines.push(format!("  {} renders as {}", shadow.name, shadow.renders_as));
        }
        lines.join("\n")
    }
}
