//! Hit resolution at the attack's strike frame.
//!
//! Damage is keyed to the animation collaborator's `AttackPerformed` cue, not
//! to the attack input: whoever is colliding with the attacker when the strike
//! frame plays takes the hit. Nobody colliding means the swing whiffs.

use super::CombatEvent;
use crate::env::{Presentation, SoundCue};
use crate::state::{Combatant, CombatantId};

/// An event one combatant's state machine raises on another combatant.
///
/// The dispatcher delivers it after the raising `handle_event` call has
/// completed, so no state machine ever handles two events at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Raised {
    pub source: CombatantId,
    pub target: CombatantId,
    pub event: CombatEvent,
}

/// Resolves the strike frame of `attacker`'s attack.
///
/// Returns the hit to deliver to the colliding opponent, or `None` on a whiff.
/// A landed strike also requests the attacker's "attack" sound.
pub fn resolve_strike(attacker: &Combatant, fx: &mut dyn Presentation) -> Option<Raised> {
    let target = attacker.colliding()?;

    fx.play(Some(attacker.id()), SoundCue::Attack);
    tracing::debug!(attacker = %attacker.id(), target = %target, "attack connected");

    Some(Raised {
        source: attacker.id(),
        target,
        event: CombatEvent::HitStarted,
    })
}
