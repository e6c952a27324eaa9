//! # tstate-cli: Thing-State Catalog Inspection
//!
//! Command-line access to the thing-state algebra for operators and
//! support tooling. Runs against the built-in warehouse catalog, or a
//! YAML/JSON declaration table passed with `--catalog`.
//!
//! ## Subcommands
//!
//! - `show`: declaration tree of a named state
//! - `parse`: canonical form, kind and members of state text
//! - `id`: validate a persisted id
//! - `union`, `superset`, `overlap`: set queries over state text
//! - `catalog`: list, export and verify the active catalog
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; each handler builds a report
//!   value and delegates all state logic to `tstate-core`.
//! - Reports print as text by default and as JSON with `--format json`.

pub mod catalog;
pub mod inspect;
pub mod output;
pub mod query;
pub mod source;
