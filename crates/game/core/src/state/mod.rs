//! Combatant records and the primitive types they are built from.
//!
//! Each [`Combatant`] owns its health, action state and movement input. The
//! combat state machine in [`crate::combat`] is the only code that changes a
//! combatant's health or action state; the round lifecycle resets combatants
//! through [`Combatant::reset`].

mod combatant;
mod common;

pub use combatant::Combatant;
pub use common::{CombatantId, MoveInput, Position};
