//! Simulation host configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use ability_runtime::TickDriver;

#[derive(Clone, Debug)]
pub struct SimConfig {
    /// TOML file with ability settings; defaults are used when unset.
    pub ability_config: Option<PathBuf>,
    pub tick_rate: u32,
    /// Simulated time after which the run stops.
    pub duration: Duration,
    /// Simulated seconds per real second.
    pub speed: f32,
    /// Directory for a log file in addition to stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ability_config: None,
            tick_rate: TickDriver::DEFAULT_TICK_RATE,
            duration: Duration::from_secs(75),
            speed: 1.0,
            log_dir: None,
        }
    }
}

impl SimConfig {
    pub const MAX_SPEED: f32 = 1000.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ABILITY_CONFIG` - Path to the ability TOML file (default: built-in values)
    /// - `SIM_TICK_RATE` - Frames per second (default: 60)
    /// - `SIM_DURATION_SECS` - Simulated seconds to run (default: 75)
    /// - `SIM_SPEED` - Time multiplier, at most 1000 (default: 1.0)
    /// - `SIM_LOG_DIR` - Also write logs to `ability-sim.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.ability_config = env::var("ABILITY_CONFIG").ok().map(PathBuf::from);

        if let Some(rate) = read_env::<u32>("SIM_TICK_RATE") {
            config.tick_rate = rate.max(1);
        }

        if let Some(duration) = read_env::<f32>("SIM_DURATION_SECS").and_then(run_duration) {
            config.duration = duration;
        }

        if let Some(speed) = read_env::<f32>("SIM_SPEED").and_then(speed_factor) {
            config.speed = speed;
        }

        config.log_dir = env::var("SIM_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Positive run length in seconds, or `None` if it does not fit a [`Duration`].
fn run_duration(secs: f32) -> Option<Duration> {
    Duration::try_from_secs_f32(secs)
        .ok()
        .filter(|duration| !duration.is_zero())
}

fn speed_factor(speed: f32) -> Option<f32> {
    (speed > 0.0 && speed <= SimConfig::MAX_SPEED).then_some(speed)
}
