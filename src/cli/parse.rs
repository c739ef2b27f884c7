//! CLI parse: clap types for Treeseal. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Treeseal CLI - Tamper-evident directory tree fingerprinting
#[derive(Parser)]
#[command(name = "treeseal")]
#[command(about = "Fingerprint a directory tree and verify it later")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a directory: fingerprint every file and seal the tree
    Audit {
        /// Directory to audit
        target: PathBuf,

        /// Where to persist audit artifacts (default: a reserved
        /// subdirectory of the target)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Verify a directory against its stored audit
    Verify {
        /// Directory to verify
        target: PathBuf,

        /// Where audit artifacts were persisted
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the stored audit report for a directory
    Report {
        /// Audited directory
        target: PathBuf,

        /// Where audit artifacts were persisted
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List prior audits under the given search roots
    Discover {
        /// Directories to search (default: configured search roots)
        roots: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
