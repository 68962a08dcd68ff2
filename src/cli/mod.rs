//! Command-line interface for frameseq.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **scan**: List every image sequence in one or more directories
//! - **find**: Show one sequence, named by a frame path or a template
//! - **range**: Parse a frame range expression and print its canonical form
//! - **name**: Convert a sequence name between notations or render a frame
//!
//! ## Usage
//!
//! ```text
//! # List sequences in the current directory
//! frameseq scan
//!
//! # Only real sequences, named printf-style
//! frameseq scan renders/ --min-frames 2 --notation modulo
//!
//! # Frames and gaps of one sequence
//! frameseq find renders/beauty.####.exr
//!
//! # JSON output for scripting
//! frameseq --format json range 1-20 23 24
//!
//! # Convert a name
//! frameseq name 'beauty.%04d.exr' --to hash
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::types::{Notation, WidthMatch};

pub mod find;
pub mod name;
pub mod range;
pub mod scan;

#[derive(Parser)]
#[command(name = "frameseq")]
#[command(version)]
#[command(about = "Find numbered image sequences and work with frame ranges")]
#[command(
    long_about = "frameseq groups files that differ only in their frame number into sequences.\n\nIt reports:\n- The frames present and the frames missing from each sequence\n- Sequence names in {:04d}, %04d or #### notation\n- Canonical forms of frame range expressions such as '1-20, 23 24'"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every image sequence in one or more directories
    Scan(scan::ScanArgs),

    /// Show the sequence matching a frame path or template
    Find(find::FindArgs),

    /// Parse a frame range expression
    Range(range::RangeArgs),

    /// Convert or render a sequence name
    Name(name::NameArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Notation choices on the command line
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum NotationArg {
    /// {:04d}
    FormatCode,
    /// %04d
    Modulo,
    /// ####
    #[default]
    Hash,
}

impl From<NotationArg> for Notation {
    fn from(arg: NotationArg) -> Self {
        match arg {
            NotationArg::FormatCode => Notation::FormatCode,
            NotationArg::Modulo => Notation::Modulo,
            NotationArg::Hash => Notation::NumberSign,
        }
    }
}

/// Width matching choices for generated patterns
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum WidthArg {
    Any,
    Exact,
    Min,
    Max,
}

impl From<WidthArg> for WidthMatch {
    fn from(arg: WidthArg) -> Self {
        match arg {
            WidthArg::Any => WidthMatch::Any,
            WidthArg::Exact => WidthMatch::Exact,
            WidthArg::Min => WidthMatch::Min,
            WidthArg::Max => WidthMatch::Max,
        }
    }
}

/// List the files directly inside `directory`, sorted.
///
/// Each returned path is `directory` followed by the file name, so the
/// directory text the user typed is preserved. An empty `directory` lists the
/// current directory and returns bare file names.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_directory(directory: &str) -> anyhow::Result<Vec<String>> {
    let dir = if directory.is_empty() {
        Path::new(".")
    } else {
        Path::new(directory)
    };

    let mut paths = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory '{}'", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(file_name) => paths.push(format!("{directory}{file_name}")),
            Err(file_name) => debug!(?file_name, "Skipping non UTF-8 file name"),
        }
    }

    paths.sort();
    Ok(paths)
}

/// Append the platform separator unless `directory` already ends with one
#[must_use]
pub fn with_trailing_separator(directory: &str) -> String {
    if directory.is_empty() || directory.ends_with(std::path::is_separator) {
        directory.to_string()
    } else {
        format!("{directory}{}", std::path::MAIN_SEPARATOR)
    }
}
