//! Arena client binary.
//!
//! Loads the match config and a scripted bout, plays it to completion and
//! prints the final session snapshot as JSON.
//!
//! ```bash
//! ARENA_SCENARIO=path/to/bout.toml RUST_LOG=debug cargo run -p arena-client
//! ```

use anyhow::{Context, Result};

use arena_client::{ClientConfig, Driver, setup_logging};
use arena_content::{ConfigLoader, ScenarioLoader};
use arena_runtime::{Runtime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _log_guard = setup_logging(config.session_id.as_deref(), config.log_dir.clone())?;

    let setup = ConfigLoader::load(&config.config_path)?;
    let scenario = ScenarioLoader::load(&config.scenario_path)?;
    let engine = setup.build_engine()?;

    let mut runtime_config = RuntimeConfig {
        arena: setup.config.clone(),
        ..RuntimeConfig::default()
    };
    if let Some(hz) = config.tick_rate_hz {
        runtime_config.tick_rate_hz = hz;
    }
    let dt = config.tick_rate_hz.map(|_| runtime_config.tick_dt());

    let runtime = Runtime::builder()
        .config(runtime_config)
        .engine(engine)
        .build()
        .await
        .context("Failed to start runtime")?;

    let snapshot = Driver::new(runtime.handle(), scenario, dt).run().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    runtime.shutdown().await?;
    Ok(())
}
