use clap::Parser;
use tracing_subscriber::EnvFilter;

use frameseq::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("frameseq=debug,info")
    } else {
        EnvFilter::new("frameseq=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Scan(args) => {
            cli::scan::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Find(args) => {
            cli::find::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Range(args) => {
            cli::range::run(args, cli.format)?;
        }
        cli::Commands::Name(args) => {
            cli::name::run(args, cli.format)?;
        }
    }

    Ok(())
}
