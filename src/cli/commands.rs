use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "survey-payout")]
#[command(about = "Convert survey exports into a pending micro-payment list")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score an export and write the payment list file
    Process {
        /// Path to the survey export (CSV, header row present)
        input: PathBuf,

        /// Compute the batch without writing the output file
        #[arg(long)]
        dry_run: bool,

        /// Override the qualifying score threshold
        #[arg(short, long)]
        threshold: Option<u8>,

        /// Override the output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Preview per-row quality scores without writing anything
    Score {
        /// Path to the survey export
        input: PathBuf,

        /// Also show rows below the qualifying threshold
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check an export's header against the expected column schema
    Validate {
        /// Path to the survey export
        input: PathBuf,
    },
}
