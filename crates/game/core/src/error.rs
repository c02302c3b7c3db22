//! Errors surfaced by the arena rules.
//!
//! Events that are valid but inapplicable in the current state, whiffed
//! attacks and rounds with no survivor are normal outcomes and never produce
//! an error. What remains falls in two groups:
//!
//! - **Contract violations** ([`ArenaError::is_contract_violation`]): a
//!   collaborator sent something the rules cannot interpret, such as an event
//!   code outside the table. These indicate a bug on the producer side.
//! - **Rejections**: the request is well-formed but not allowed right now or
//!   with this roster (pausing outside a round, an oversized roster).

use crate::engine::MatchPhase;
use crate::state::CombatantId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArenaError {
    #[error("event code {code} is not a known combat event")]
    InvalidEvent { code: u8 },

    #[error("combatant {0} is not in the roster")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} cannot collide with itself")]
    SelfCollision(CombatantId),

    #[error("a match needs at least two combatants, got {count}")]
    RosterTooSmall { count: usize },

    #[error("roster is full ({capacity} combatants)")]
    RosterFull { capacity: usize },

    #[error("combatant name `{0}` is already taken")]
    DuplicateName(String),

    #[error("pause is only available during a round, match is {phase}")]
    PauseUnavailable { phase: MatchPhase },

    #[error("match config `{field}` is out of range")]
    InvalidConfig { field: String },
}

impl ArenaError {
    /// Returns true when the error means a collaborator broke the event
    /// contract rather than asking for something disallowed.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEvent { .. } | Self::UnknownCombatant(_) | Self::SelfCollision(_)
        )
    }
}
