//! Data-driven arena content and loaders.
//!
//! This crate reads static match content from TOML files:
//! - Match rules and the combatant roster (`arena.toml`)
//! - Scripted bouts used by the headless client and tests (`scenario.toml`)
//!
//! Content is turned into `arena-core` types and never appears in session
//! state by itself.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArenaSetup, ConfigLoader, Scenario, ScenarioLoader, ScriptedAction, ScriptedStep,
};

/// Directory holding the content files shipped with this crate.
pub const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
