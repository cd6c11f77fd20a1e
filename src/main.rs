mod cli;

use anyhow::Result;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = mealcal::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealcal::observability::init_observability(
        "mealcal",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    cli::run(cli.command, config).await
}
