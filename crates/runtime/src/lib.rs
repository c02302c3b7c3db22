//! Runtime orchestration for the arena simulation.
//!
//! This crate wires the deterministic [`arena_core::ArenaEngine`] into an
//! async runtime: a simulation worker owns the engine, clients talk to it
//! through a cloneable [`RuntimeHandle`], and every presentation request and
//! match milestone is published on a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, StepReport};
pub use events::{Event, EventBus, MatchNotification, PresentationEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
