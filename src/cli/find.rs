use clap::Args;

use crate::cli::scan::sequence_json;
use crate::cli::{list_directory, NotationArg, OutputFormat};
use crate::core::sequence::FrameSequence;
use crate::core::types::Notation;
use crate::matching::discovery::find_sequence;
use crate::utils::validation::split_path;

#[derive(Args)]
pub struct FindArgs {
    /// Path of any frame (renders/f.0001.png) or a template (renders/f.####.png)
    #[arg(required = true)]
    pub target: String,

    /// Notation used for the sequence name
    #[arg(short, long, value_enum, default_value = "hash")]
    pub notation: NotationArg,

    /// Print the path of every frame
    #[arg(long)]
    pub list: bool,
}

/// Execute find subcommand
///
/// # Errors
///
/// Returns an error if the target's directory cannot be listed or no sequence matches.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FindArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (directory, _) = split_path(&args.target);
    let paths = list_directory(directory)?;

    if verbose {
        eprintln!("Listed {} files", paths.len());
    }

    let seq = find_sequence(&paths, &args.target)?;
    let notation = Notation::from(args.notation);

    match format {
        OutputFormat::Text => print_text_sequence(&seq, notation, args.list),
        OutputFormat::Json => print_json_sequence(&seq, notation, args.list)?,
        OutputFormat::Tsv => print_tsv_sequence(&seq),
    }

    Ok(())
}

fn print_text_sequence(seq: &FrameSequence, notation: Notation, list: bool) {
    println!("Sequence: {}", seq.name(notation));
    println!("  Frames: {} ({} files)", seq.range_string(), seq.len());
    if seq.has_gaps() {
        println!(
            "  Missing: {} ({} frames)",
            seq.missing_range_string(),
            seq.missing_count()
        );
    } else {
        println!("  Missing: none");
    }

    if list {
        println!();
        for (frame, path) in seq.iter() {
            println!("{frame}\t{path}");
        }
    }
}

fn print_json_sequence(seq: &FrameSequence, notation: Notation, list: bool) -> anyhow::Result<()> {
    let mut output = sequence_json(seq, notation);
    if list {
        let files: Vec<serde_json::Value> = seq
            .iter()
            .map(|(frame, path)| serde_json::json!({ "frame": frame, "path": path }))
            .collect();
        output["files"] = serde_json::json!(files);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_sequence(seq: &FrameSequence) {
    println!("frame\tpath");
    for (frame, path) in seq.iter() {
        println!("{frame}\t{path}");
    }
}
