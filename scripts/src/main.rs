use clap::Parser;
use scripts::{cli::Cli, errors::ScriptError, utils::setup_client};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Connects to the selected network and runs the selected deploy script.
///
/// Returns before the process exits so that a spawned fork node is shut down.
async fn run(cli: Cli) -> Result<(), ScriptError> {
    let network_config = cli.network_config()?;
    let command = cli.command()?;

    let connection = setup_client(&network_config, cli.confirmations).await?;

    command
        .run(
            connection.backend(),
            &cli.artifacts_dir,
            cli.etherscan_key.is_some(),
        )
        .await
}
