mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Encrypt(args) => commands::encrypt::run_encrypt(args)?,
        Commands::Decrypt(args) => commands::decrypt::run_decrypt(args)?,
        Commands::Inspect(args) => commands::inspect::run_inspect(args)?,
        Commands::Link(args) => commands::link::run_link(args)?,
        Commands::OpenLink(args) => commands::open_link::run_open_link(args)?,
    }

    Ok(())
}

/// Install the stderr log subscriber. Stdout is reserved for command output.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Unable to set global default subscriber: {}", e))
}
