use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod parsing;
mod report;
mod screening;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("probe_screen=debug,info")
    } else {
        EnvFilter::new("probe_screen=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Screen(args) => {
            cli::screen::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Export(args) => {
            cli::export::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
