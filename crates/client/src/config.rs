//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use arena_content::DATA_DIR;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Match rules and roster (`ARENA_CONFIG`).
    pub config_path: PathBuf,
    /// Scripted bout to play (`ARENA_SCENARIO`).
    pub scenario_path: PathBuf,
    /// Session identifier used for the log directory (`ARENA_SESSION_ID`).
    pub session_id: Option<String>,
    /// Log root override (`ARENA_LOG_DIR`).
    pub log_dir: Option<PathBuf>,
    /// Simulation rate override (`ARENA_TICK_HZ`); the scenario's own step
    /// is used when unset.
    pub tick_rate_hz: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let data = PathBuf::from(DATA_DIR);
        Self {
            config_path: data.join("arena.toml"),
            scenario_path: data.join("scenario.toml"),
            session_id: None,
            log_dir: None,
            tick_rate_hz: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_CONFIG` - Match config TOML (default: shipped `arena.toml`)
    /// - `ARENA_SCENARIO` - Scenario TOML (default: shipped `scenario.toml`)
    /// - `ARENA_SESSION_ID` - Session identifier (default: timestamp based)
    /// - `ARENA_LOG_DIR` - Log directory root (default: platform cache dir)
    /// - `ARENA_TICK_HZ` - Fixed simulation rate in Hz
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("ARENA_CONFIG") {
            config.config_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("ARENA_SCENARIO") {
            config.scenario_path = PathBuf::from(path);
        }

        config.session_id = env::var("ARENA_SESSION_ID").ok();
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);
        config.tick_rate_hz = read_env::<u32>("ARENA_TICK_HZ").map(|hz| hz.max(1));

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
