use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::ranges::{parse_frame_list, FrameRangeSet};

#[derive(Args)]
pub struct RangeArgs {
    /// Frame range expression, e.g. "1-20, 23 24" or 1-100-5
    #[arg(required = true, allow_hyphen_values = true, num_args = 1..)]
    pub expression: Vec<String>,

    /// Print every frame in the order the expression walks them
    #[arg(long)]
    pub list: bool,
}

/// Execute range subcommand
///
/// # Errors
///
/// Returns an error if the expression does not parse.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RangeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let expression = args.expression.join(" ");
    let frames = parse_frame_list(&expression)?;
    let set: FrameRangeSet = frames.iter().copied().collect();

    match format {
        OutputFormat::Text => {
            if args.list {
                for frame in &frames {
                    println!("{frame}");
                }
            } else {
                println!("{set}");
            }
        }
        OutputFormat::Json => {
            let listed = if args.list {
                serde_json::to_value(&frames)?
            } else {
                serde_json::to_value(&set)?
            };
            let output = serde_json::json!({
                "expression": expression,
                "canonical": set.to_string(),
                "count": set.len(),
                "frames": listed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("canonical\tcount");
            println!("{set}\t{}", set.len());
        }
    }

    Ok(())
}
