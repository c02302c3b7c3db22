//! Combat rules: action states, events, the per-combatant state machine and
//! strike resolution.
//!
//! The state machine itself lives on [`Combatant`](crate::Combatant) (see
//! [`machine`]); this module owns the vocabulary it speaks.

pub mod damage;
pub mod event;
pub mod machine;
pub mod resolver;
pub mod state;

pub use damage::{apply_damage, health_fraction};
pub use event::{AnimationCue, CombatEvent, InputEvent};
pub use resolver::{Raised, resolve_strike};
pub use state::CombatState;
