//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Classify variants from ACMG evidence and browse annotated variant tables.
#[derive(Debug, Parser)]
#[command(name = "varview", author, version)]
pub struct Cli {
    /// Dashboard configuration (YAML or JSON); built-in defaults when omitted
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a set of evidence codes
    Classify(ClassifyArgs),

    /// Show the evidence catalog, or one code's description
    Catalog(CatalogArgs),

    /// Replay checkbox events (+CODE / -CODE) and assess after each
    Session(SessionArgs),

    /// Inspect the annotated variant table
    Variants(VariantsArgs),
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Evidence codes, e.g. PVS1 PM2 PP3
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Classify codes the catalog does not offer instead of rejecting them
    #[arg(long)]
    pub allow_unknown: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Only show this code
    #[arg(long)]
    pub code: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Toggle events in order: +CODE checks, -CODE unchecks
    #[arg(required = true, allow_hyphen_values = true)]
    pub events: Vec<String>,

    /// Print JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct VariantsArgs {
    /// Variant table; overrides the configured path
    #[arg(long)]
    pub table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: VariantsCommand,
}

#[derive(Debug, Subcommand)]
pub enum VariantsCommand {
    /// Category counts and numeric distributions of the configured columns
    Summary {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Grid view of the main columns
    List {
        /// Show at most this many rows
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Detail view of one variant
    Show {
        /// Variant ID (row position after sorting)
        #[arg(long)]
        id: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
