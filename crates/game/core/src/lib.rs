//! Deterministic rules for round-based arena combat.
//!
//! `arena-core` defines the combat state machine, strike resolution, scoring
//! and round sequencing, and exposes them as plain synchronous APIs that the
//! runtime and offline tools can drive. All session mutation flows through
//! [`engine::ArenaEngine`]; presentation side effects are requested from the
//! collaborator traits in [`env`] and never performed here.
pub mod arena;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod snapshot;
pub mod state;

pub use arena::Arena;
pub use combat::{AnimationCue, CombatEvent, CombatState, InputEvent, Raised};
pub use config::{ArenaConfig, CombatantSpec};
pub use engine::{
    ArenaEngine, MatchController, MatchEvent, MatchPhase, Round, ScoreKeeper, TickOutcome,
};
pub use env::{
    AnimTrigger, Animator, Audio, Hud, MenuKind, NullPresentation, Pose, Presentation,
    PresentationLog, PresentationRequest, SoundCue,
};
pub use error::ArenaError;
pub use snapshot::{ArenaSnapshot, CombatantSnapshot};
pub use state::{Combatant, CombatantId, MoveInput, Position};
