mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pymatuning=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli::effective_config(&cli)?;

    match cli.command {
        Commands::Orgmode { modname, .. } => {
            cli::orgmode(&config, &modname)?;
        }
        Commands::Modules { modname } => {
            cli::list_modules(&config, &modname)?;
        }
        Commands::Structure { modname } => {
            cli::show_structure(&config, &modname)?;
        }
        Commands::Definitions { modname } => {
            cli::show_definitions(&config, &modname)?;
        }
    }

    Ok(())
}
