use std::path::PathBuf;

use clap::Args;

use crate::cli::{list_directory, with_trailing_separator, NotationArg, OutputFormat};
use crate::core::sequence::FrameSequence;
use crate::core::types::Notation;
use crate::matching::discovery::find_all_sequences_with;
use crate::matching::engine::{MatchingConfig, SequenceScan, DEFAULT_MIN_FRAMES};

#[derive(Args)]
pub struct ScanArgs {
    /// Directories to scan (not recursive)
    #[arg(default_value = ".")]
    pub directories: Vec<PathBuf>,

    /// Minimum number of frames for a group to be listed
    #[arg(long, default_value_t = DEFAULT_MIN_FRAMES)]
    pub min_frames: usize,

    /// Notation used for sequence names
    #[arg(short, long, value_enum, default_value = "hash")]
    pub notation: NotationArg,

    /// Also list files that are not part of any sequence
    #[arg(long)]
    pub show_unmatched: bool,
}

/// Execute scan subcommand
///
/// # Errors
///
/// Returns an error if a directory cannot be listed or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut paths = Vec::new();
    for directory in &args.directories {
        let directory = if directory.as_os_str() == "." {
            String::new()
        } else {
            with_trailing_separator(&directory.to_string_lossy())
        };
        paths.extend(list_directory(&directory)?);
    }

    if verbose {
        eprintln!(
            "Listed {} files in {} directories",
            paths.len(),
            args.directories.len()
        );
    }

    let config = MatchingConfig {
        min_frames: args.min_frames,
    };
    let scan = find_all_sequences_with(&paths, &config);
    let notation = Notation::from(args.notation);

    match format {
        OutputFormat::Text => print_text_scan(&scan, notation, args.show_unmatched),
        OutputFormat::Json => print_json_scan(&scan, notation, args.show_unmatched)?,
        OutputFormat::Tsv => print_tsv_scan(&scan, notation),
    }

    Ok(())
}

fn print_text_scan(scan: &SequenceScan, notation: Notation, show_unmatched: bool) {
    if scan.sequences.is_empty() {
        println!("No sequences found.");
    }

    for seq in &scan.sequences {
        println!("{}", sequence_line(seq, notation));
    }

    if show_unmatched && !scan.unmatched.is_empty() {
        println!("\nNot in any sequence:");
        for err in &scan.unmatched {
            println!("  {}", err.path().unwrap_or_default());
        }
    }
}

/// One line per sequence: name, span, precise range if gapped, counts
fn sequence_line(seq: &FrameSequence, notation: Notation) -> String {
    let mut line = format!("{} {}-{}", seq.name(notation), seq.start(), seq.end());
    if seq.has_gaps() {
        line.push_str(&format!(" ({})", seq.range_string()));
    }
    line.push_str(&format!(" [{} frames", seq.len()));
    if seq.has_gaps() {
        line.push_str(&format!(", {} missing", seq.missing_count()));
    }
    line.push(']');
    line
}

fn print_json_scan(
    scan: &SequenceScan,
    notation: Notation,
    show_unmatched: bool,
) -> anyhow::Result<()> {
    let sequences: Vec<serde_json::Value> = scan
        .sequences
        .iter()
        .map(|seq| sequence_json(seq, notation))
        .collect();

    let mut output = serde_json::json!({ "sequences": sequences });
    if show_unmatched {
        let unmatched: Vec<&str> = scan.unmatched.iter().filter_map(|e| e.path()).collect();
        output["unmatched"] = serde_json::json!(unmatched);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// JSON description of a sequence, shared with the find subcommand
pub(crate) fn sequence_json(seq: &FrameSequence, notation: Notation) -> serde_json::Value {
    let key = seq.key();
    serde_json::json!({
        "name": seq.name(notation),
        "directory": key.directory,
        "width": key.width,
        "start": seq.start(),
        "end": seq.end(),
        "count": seq.len(),
        "frames": seq.range_string(),
        "missing": seq.missing_range_string(),
        "missing_count": seq.missing_count(),
    })
}

fn print_tsv_scan(scan: &SequenceScan, notation: Notation) {
    println!("name\tstart\tend\tcount\tframes\tmissing");
    for seq in &scan.sequences {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            seq.name(notation),
            seq.start(),
            seq.end(),
            seq.len(),
            seq.range_string(),
            seq.missing_range_string(),
        );
    }
}
