//! `freshchain` - runs the custody walkthrough and prints the customer card.

use anyhow::{Context, Result};
use fc_runtime::{run, telemetry, RuntimeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    telemetry::init_logging(&config).context("Failed to initialize logging")?;

    info!("===========================================");
    info!("  FreshChain Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Admin: {}", config.admin);
    info!("===========================================");

    let outcome = run(&config).await.context("Walkthrough failed")?;

    for step in &outcome.steps {
        println!("[{}] {}", step.actor, step.status);
    }
    println!();
    println!("Traceability link: {}", outcome.traceability_link);
    println!();
    print!("{}", outcome.report);

    Ok(())
}
