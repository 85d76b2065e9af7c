pub mod board;
pub mod check;
pub mod export;
pub mod load;
pub mod report;
pub mod schema;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "planledger")]
#[command(
    author,
    version,
    about = "Resource and priority roll-ups for annual planning outlines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging and report ignored lines
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed plan as an indented tree
    Dump(ReportArgs),

    /// Headcount per team across all initiatives
    Resources(ResourcesArgs),

    /// Spreadsheet rows per project
    Csv(CsvArgs),

    /// Targets grouped by priority, most important first
    Prioritized(ReportArgs),

    /// Dollar-denominated asks
    Asks(ReportArgs),

    /// Per-team asks against current headcount
    Teams(ReportArgs),

    /// JSON export of the plan and all roll-ups
    Export(ReportArgs),

    /// Report data-quality problems
    Check(CheckArgs),

    /// Card-board export and priority sync
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },

    /// Print JSON Schema for config validation
    Schema,
}

/// Where the planning document and config come from
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Path to config file (default: planledger.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Planning document (overrides config)
    #[arg(short, long, env = "PLANLEDGER_INPUT")]
    pub input: Option<PathBuf>,

    /// Read the document in place instead of moving it to <input>.tmp
    #[arg(long)]
    pub no_stage: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct ResourcesArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Only count targets at or above this priority (1-11)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=11))]
    pub min_priority: Option<u8>,
}

#[derive(Parser, Clone, Debug)]
pub struct CsvArgs {
    #[command(flatten)]
    pub report: ReportArgs,

    /// One row per project without the target column
    #[arg(long)]
    pub projects: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exit 1 if any warning-level problem is found (CI mode)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Export cards with priorities and resource needs as CSV
    Export(BoardExportArgs),

    /// Apply the priorities of an edited card CSV to the board snapshot
    Sync(BoardSyncArgs),
}

#[derive(Parser, Clone, Debug)]
pub struct BoardExportArgs {
    /// Board JSON snapshot
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Path to config file (default: planledger.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the CSV to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct BoardSyncArgs {
    /// Board JSON snapshot, rewritten in place
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Card CSV with Title, New Priority and id columns
    #[arg(long)]
    pub csv: PathBuf,

    /// Path to config file (default: planledger.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the label edits without touching the snapshot
    #[arg(long)]
    pub dry_run: bool,
}
