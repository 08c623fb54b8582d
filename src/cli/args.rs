//! CLI argument definitions using clap
//!
//! Commands:
//! - screener query --data <file> [--query <q>] [--sort <field>] [--desc] ...
//! - screener explain --query <q>
//! - screener fields
//! - screener start --data <file>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::config::OutputFormat;

/// screener - filter, sort and page a stock dataset with AND-joined conditions
#[derive(Parser, Debug)]
#[command(name = "screener")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a single query and exit
    Query(QueryArgs),

    /// Show how a query is understood, or why it is rejected
    Explain {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Query text, e.g. "PE < 15 AND ROE > 20"
        #[arg(long)]
        query: String,

        /// Output format (overrides the config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the field aliases accepted in queries
    Fields {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (overrides the config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Start an interactive session reading JSON requests from stdin
    Start {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Dataset file (overrides data_file in the config)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

/// Arguments for `screener query`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dataset file (overrides data_file in the config)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Query text; omit to browse every record
    #[arg(long)]
    pub query: Option<String>,

    /// Field to sort by (alias or canonical name)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size: 10, 25 or 50 (overrides the config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Output format (overrides the config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
