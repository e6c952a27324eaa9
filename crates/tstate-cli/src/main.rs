//! # tstate CLI entry point
//!
//! Parses command-line arguments, resolves the catalog, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tstate_cli::catalog::{run_catalog, CatalogArgs};
use tstate_cli::inspect::{run_id, run_parse, run_show, IdArgs, ParseArgs, ShowArgs};
use tstate_cli::output::OutputFormat;
use tstate_cli::query::{run_overlap, run_superset, run_union, PairArgs, UnionArgs};
use tstate_cli::source::resolve_registry;

/// Thing-state catalog inspection.
///
/// Parses, renders and queries warehouse thing states against the built-in
/// catalog or a catalog declaration file.
#[derive(Parser, Debug)]
#[command(name = "tstate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog declaration file (YAML or JSON). Defaults to the built-in
    /// warehouse catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Report output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the declaration tree of a named state.
    Show(ShowArgs),

    /// Parse state text and print its canonical form and members.
    Parse(ParseArgs),

    /// Validate a persisted state id.
    Id(IdArgs),

    /// Union two or more states.
    Union(UnionArgs),

    /// Whether the left state contains every member of the right state.
    Superset(PairArgs),

    /// Whether two states share any member.
    Overlap(PairArgs),

    /// List, export or verify the active catalog.
    Catalog(CatalogArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Explicit -v flags win over RUST_LOG.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tstate starting");

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let registry = resolve_registry(cli.catalog.as_deref())?;
    let format = cli.format;

    match &cli.command {
        Commands::Show(args) => run_show(args, &registry, format),
        Commands::Parse(args) => run_parse(args, &registry, format),
        Commands::Id(args) => run_id(args, &registry, format),
        Commands::Union(args) => run_union(args, &registry, format),
        Commands::Superset(args) => run_superset(args, &registry, format),
        Commands::Overlap(args) => run_overlap(args, &registry, format),
        Commands::Catalog(args) => run_catalog(args, &registry, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tstate_cli::catalog::CatalogCommand;

    #[test]
    fn cli_parse_show() {
        let cli = Cli::try_parse_from(["tstate", "show", "HeldInShelf"]).unwrap();
        if let Commands::Show(args) = cli.command {
            assert_eq!(args.name, "HeldInShelf");
        } else {
            panic!("expected show");
        }
    }

    #[test]
    fn cli_parse_parse_with_pipes() {
        let cli = Cli::try_parse_from(["tstate", "parse", "InNarnia|InGraveyard"]).unwrap();
        if let Commands::Parse(args) = cli.command {
            assert_eq!(args.text, "InNarnia|InGraveyard");
        } else {
            panic!("expected parse");
        }
    }

    #[test]
    fn cli_parse_id_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["tstate", "id", "-1"]).unwrap();
        if let Commands::Id(args) = cli.command {
            assert_eq!(args.id, -1);
        } else {
            panic!("expected id");
        }
    }

    #[test]
    fn cli_parse_id_rejects_non_numeric() {
        assert!(Cli::try_parse_from(["tstate", "id", "HeldInShelf"]).is_err());
    }

    #[test]
    fn cli_parse_union_requires_two_states() {
        assert!(Cli::try_parse_from(["tstate", "union", "InNarnia"]).is_err());
        let cli = Cli::try_parse_from(["tstate", "union", "InNarnia", "InGraveyard", "InJunkyard"])
            .unwrap();
        if let Commands::Union(args) = cli.command {
            assert_eq!(args.states.len(), 3);
        } else {
            panic!("expected union");
        }
    }

    #[test]
    fn cli_parse_superset_and_overlap() {
        let cli = Cli::try_parse_from(["tstate", "superset", "InShelf", "HeldInShelf"]).unwrap();
        if let Commands::Superset(args) = cli.command {
            assert_eq!(args.left, "InShelf");
            assert_eq!(args.right, "HeldInShelf");
        } else {
            panic!("expected superset");
        }
        let cli = Cli::try_parse_from(["tstate", "overlap", "InShelf", "WithCustomer"]).unwrap();
        assert!(matches!(cli.command, Commands::Overlap(_)));
        assert!(Cli::try_parse_from(["tstate", "overlap", "InShelf"]).is_err());
    }

    #[test]
    fn cli_parse_catalog_subcommands() {
        let cli = Cli::try_parse_from(["tstate", "catalog", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Catalog(CatalogArgs {
                command: CatalogCommand::List
            })
        ));

        let cli =
            Cli::try_parse_from(["tstate", "catalog", "export", "--out", "catalog.yaml"]).unwrap();
        if let Commands::Catalog(CatalogArgs {
            command: CatalogCommand::Export { out },
        }) = cli.command
        {
            assert_eq!(out, Some(PathBuf::from("catalog.yaml")));
        } else {
            panic!("expected catalog export");
        }

        let cli = Cli::try_parse_from(["tstate", "catalog", "verify"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Catalog(CatalogArgs {
                command: CatalogCommand::Verify
            })
        ));
    }

    #[test]
    fn cli_parse_global_options() {
        let cli = Cli::try_parse_from(["tstate", "catalog", "list"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.catalog.is_none());

        let cli = Cli::try_parse_from([
            "tstate",
            "parse",
            "InBasket",
            "--format",
            "json",
            "--catalog",
            "warehouse.yaml",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.catalog, Some(PathBuf::from("warehouse.yaml")));

        assert!(Cli::try_parse_from(["tstate", "--format", "xml", "catalog", "list"]).is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["tstate", "catalog", "list"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli1 = Cli::try_parse_from(["tstate", "-v", "catalog", "list"]).unwrap();
        assert_eq!(cli1.verbose, 1);

        let cli3 = Cli::try_parse_from(["tstate", "-vvv", "catalog", "list"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["tstate"]).is_err());
        assert!(Cli::try_parse_from(["tstate", "nonexistent"]).is_err());
    }

    #[test]
    fn run_against_builtin_catalog() {
        let cli = Cli::try_parse_from(["tstate", "superset", "InShelf", "HeldInShelf"]).unwrap();
        assert_eq!(run(&cli).unwrap(), 0);

        let cli = Cli::try_parse_from(["tstate", "parse", "NotARealState"]).unwrap();
        assert!(run(&cli).is_err());
    }

    #[test]
    fn run_against_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dock.yaml");
        std::fs::write(
            &path,
            "atomic:\n  - { name: Docked, id: 1 }\ncomposite: []\n",
        )
        .unwrap();
        let path = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["tstate", "--catalog", &path, "id", "1"]).unwrap();
        assert_eq!(run(&cli).unwrap(), 0);

        let cli = Cli::try_parse_from(["tstate", "--catalog", &path, "id", "4096"]).unwrap();
        assert!(run(&cli).is_err());
    }

    #[test]
    fn cli_debug_impl() {
        let cli = Cli::try_parse_from(["tstate", "catalog", "list"]).unwrap();
        assert!(format!("{cli:?}").contains("Catalog"));
    }
}
