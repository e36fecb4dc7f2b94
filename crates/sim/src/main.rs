//! Scripted host for the ability plugin.
mod config;
mod scenario;

use std::path::Path;

use ability_content::ConfigLoader;
use ability_core::AbilityConfig;
use ability_runtime::{AbilityPlugin, TickDriver};
use anyhow::Result;
use config::SimConfig;
use scenario::{Scenario, Simulation};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let ability = match &config.ability_config {
        Some(path) => ConfigLoader::load(path)?,
        None => AbilityConfig::default(),
    };

    let mut plugin = AbilityPlugin::with_tick_scheduler(ability)?;
    plugin.on_enable()?;
    tracing::info!(
        plugin = plugin.name(),
        version = ?plugin.version(),
        tick_rate = config.tick_rate,
        duration = ?config.duration,
        speed = config.speed,
        "starting simulation"
    );

    let mut sim = Simulation::new(plugin, Scenario::demo(), config.duration, config.speed);
    let driver = TickDriver::new(config.tick_rate);
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    let ticks = driver.run(shutdown, |dt| sim.tick(dt)).await;
    sim.finish()?;
    tracing::info!(ticks, "simulation finished");

    Ok(())
}

/// Setup logging to stderr and, when a directory is configured, to a file.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "ability-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/ability-sim.log", dir.display());
    }

    Ok(guard)
}
