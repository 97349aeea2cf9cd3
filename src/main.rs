//! teveclub-bot - Entry point for the daily camel routine

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use teveclub::config::{Config, CONFIG_EXAMPLE};
use teveclub::services::TerminalPrompt;
use teveclub::App;

/// TeveClub Automatizáció
#[derive(Debug, Parser)]
#[command(name = "teveclub-bot", version, after_help = CONFIG_EXAMPLE)]
struct Cli {
    /// A konfig file (lásd a lenti példát)
    #[arg(short, long, value_name = "config.toml")]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let report = App::new(config).run(&TerminalPrompt).await?;
    tracing::info!(?report, "Kész");
    Ok(())
}
