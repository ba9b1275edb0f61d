use anyhow::{Context, Result};
use clap::Parser;
use myr_cli::{build_charts, write_charts, CliArgs, LogLevel};
use myr_config::StatsConfig;
use myr_core::WindowParams;
use myr_rpc_client::RpcClient;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();
    init_tracing(cli.log_level);

    let mut config = StatsConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    cli.apply_to(&mut config)?;

    let settings = config.active_network()?.clone();
    let params = WindowParams::new(settings.block_window, settings.block_domain)?;
    let deployments = config.deployments.clone();

    info!(
        target: "myrstat",
        network = %config.network,
        rpc = %settings.rpc_url(),
        block_window = params.block_window(),
        block_domain = params.block_domain(),
        "starting run"
    );

    let client = RpcClient::from_settings(&settings)?;
    let dataset = client
        .fetch_dataset(&params, settings.fetch_concurrency)
        .await
        .context("fetching block range")?;
    info!(target: "myrstat", blocks = dataset.len(), "block range fetched");

    let charts = tokio::task::spawn_blocking(move || build_charts(&dataset, &params, &deployments))
        .await
        .context("chart task failed")??;

    let written = write_charts(&settings.output_dir, &charts)?;
    info!(target: "myrstat", charts = written.len(), dir = %settings.output_dir.display(), "run complete");
    Ok(())
}

fn init_tracing(level: LogLevel) {
    let default = tracing::Level::from(level).to_string().to_lowercase();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt().with_env_filter(env_filter).try_init();
}
