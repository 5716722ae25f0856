/*!
 * Ferry service entrypoint
 *
 * Resolves configuration from the environment, initializes logging,
 * constructs the two storage clients once, and serves the replication API.
 */

use anyhow::Context;
use ferry::config::ServiceConfig;
use ferry::logging;
use ferry::server::{self, AppState};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("ferry: {err:#}");
        std::process::exit(2);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("failed to load configuration")?;
    logging::init_logging(&config).context("failed to initialize logging")?;

    tracing::info!(
        destination_bucket = %config.destination_bucket,
        "starting ferry v{}",
        ferry::VERSION
    );

    let state = AppState::from_config(&config)
        .await
        .context("failed to construct storage clients")?;

    server::run_server(&config, state)
        .await
        .context("server terminated")?;

    Ok(())
}
