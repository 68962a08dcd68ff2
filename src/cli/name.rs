use clap::Args;

use crate::cli::{NotationArg, OutputFormat, WidthArg};
use crate::core::types::{Notation, WidthMatch};
use crate::parsing::template::SequenceName;

#[derive(Args)]
pub struct NameArgs {
    /// Sequence name with one slot: f.{:04d}.png, f.%04d.png or f.####.png
    #[arg(required = true)]
    pub name: String,

    /// Rewrite the slot in this notation
    #[arg(long, value_enum)]
    pub to: Option<NotationArg>,

    /// Render the file name of this frame
    #[arg(long, allow_negative_numbers = true)]
    pub frame: Option<i64>,

    /// Print a regular expression matching the sequence's files
    #[arg(long, value_enum)]
    pub regex: Option<WidthArg>,
}

/// Execute name subcommand
///
/// # Errors
///
/// Returns an error if the name has no slot, several slots, or a malformed slot.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: NameArgs, format: OutputFormat) -> anyhow::Result<()> {
    let parsed = SequenceName::parse(&args.name)?;
    let name = match args.to {
        Some(notation) => parsed.to_notation(notation.into()),
        None => parsed,
    };
    let rendered = args.frame.map(|frame| name.render(frame));
    let regex = args.regex.map(|width| name.regex(WidthMatch::from(width)));

    match format {
        OutputFormat::Text => {
            if let Some(rendered) = &rendered {
                println!("{rendered}");
            } else if let Some(regex) = &regex {
                println!("{regex}");
            } else {
                println!("{name}");
            }
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "input": args.name,
                "name": name.to_string(),
                "notation": name.notation(),
                "width": name.width(),
                "format_code": name.to_notation(Notation::FormatCode).to_string(),
                "modulo": name.to_notation(Notation::Modulo).to_string(),
                "numbersign": name.to_notation(Notation::NumberSign).to_string(),
            });
            if let Some(rendered) = rendered {
                output["rendered"] = serde_json::json!(rendered);
            }
            if let Some(regex) = regex {
                output["regex"] = serde_json::json!(regex);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("notation\tname");
            for notation in Notation::ALL {
                println!("{notation}\t{}", name.to_notation(notation));
            }
        }
    }

    Ok(())
}
