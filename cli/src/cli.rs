use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use municourt::KERNING_THRESHOLD;

/// Rebuild municipal court statistics tables from PDF reports.
#[derive(Debug, Parser)]
#[command(name = "municourt", about, version)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Password for encrypted PDFs
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Kerning gap, in thousandths of a text space unit, that separates two
    /// table columns
    #[arg(long, global = true, default_value_t = KERNING_THRESHOLD)]
    pub kerning_threshold: f64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a report (or every *.pdf in a directory) into JSON and CSV
    ///
    /// Output files default to the input's directory and base name. In
    /// directory mode they are always written alongside each PDF.
    Parse {
        /// PDF file or directory of PDF files
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// JSON output path (single file only)
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        /// CSV output path (single file only)
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// Dump the grouped text lines of each page
    Lines {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only this page (1-based)
        #[arg(long)]
        page: Option<u32>,
    },
}
