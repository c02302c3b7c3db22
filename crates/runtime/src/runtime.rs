//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the session.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use arena_core::{ArenaConfig, ArenaEngine, CombatantSpec};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub arena: ArenaConfig,
    /// Simulation rate of the auto-tick timer.
    pub tick_rate_hz: u32,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Drive ticks from a timer instead of [`RuntimeHandle::step`] (default: false)
    pub auto_tick: bool,
}

impl RuntimeConfig {
    /// Fixed simulation step derived from the tick rate.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            tick_rate_hz: 60,
            event_buffer_size: 256,
            command_buffer_size: 32,
            auto_tick: false,
        }
    }
}

/// Main runtime that orchestrates the arena simulation
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    specs: Option<Vec<CombatantSpec>>,
    engine: Option<ArenaEngine>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            specs: None,
            engine: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Roster to build the engine from, using `config.arena`.
    pub fn specs(mut self, specs: Vec<CombatantSpec>) -> Self {
        self.specs = Some(specs);
        self
    }

    /// Provide a prebuilt engine. Takes precedence over [`Self::specs`].
    pub fn engine(mut self, engine: ArenaEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Drive ticks from a timer at `config.tick_rate_hz`.
    pub fn auto_tick(mut self, enable: bool) -> Self {
        self.config.auto_tick = enable;
        self
    }

    /// Build the runtime and spawn the simulation worker
    pub async fn build(self) -> Result<Runtime> {
        if self.config.tick_rate_hz == 0 {
            return Err(RuntimeError::InvalidTickRate);
        }

        let engine = match (self.engine, self.specs) {
            (Some(engine), _) => engine,
            (None, Some(specs)) => ArenaEngine::new(self.config.arena.clone(), &specs)?,
            (None, None) => return Err(RuntimeError::MissingRoster),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            engine,
            command_rx,
            event_bus,
            self.config.tick_dt(),
            self.config.auto_tick,
        );

        tracing::debug!(
            tick_rate_hz = self.config.tick_rate_hz,
            auto_tick = self.config.auto_tick,
            "spawning simulation worker"
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
