//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the engine and executes every command.

mod simulation;

pub use simulation::{Command, SimulationWorker};
