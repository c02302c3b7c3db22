//! Events accepted by the combat state machine and the boundary types that
//! produce them.

use crate::error::ArenaError;
use crate::state::MoveInput;

/// Discrete event addressed to one combatant's state machine.
///
/// Events come from three sources: the input collaborator (`*Started`,
/// `DefendFinished`), the animation collaborator (`JumpFinished`,
/// `AttackPerformed`, `AttackFinished`, `HitFinished`) and the state machine
/// itself (`DuckFinished` from the ducking update, `HitStarted` raised on the
/// opponent by a landed attack).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum CombatEvent {
    JumpStarted = 0,
    JumpFinished = 1,
    DuckStarted = 2,
    DuckFinished = 3,
    AttackStarted = 4,
    AttackPerformed = 5,
    AttackFinished = 6,
    DefendStarted = 7,
    DefendFinished = 8,
    HitStarted = 9,
    HitFinished = 10,
    DeadStarted = 11,
    DeadFinished = 12,
}

impl CombatEvent {
    /// Stable wire code of this event.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a wire code.
    ///
    /// A code outside the enumeration means a producer is out of sync with this
    /// table and is reported as [`ArenaError::InvalidEvent`].
    pub fn from_code(code: u8) -> Result<Self, ArenaError> {
        Self::from_repr(code).ok_or(ArenaError::InvalidEvent { code })
    }
}

impl TryFrom<u8> for CombatEvent {
    type Error = ArenaError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Already-debounced input delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum InputEvent {
    /// New movement stick value.
    Movement { x: f32, y: f32 },
    AttackPressed,
    DefendPressed,
    DefendReleased,
}

impl InputEvent {
    pub const fn movement(input: MoveInput) -> Self {
        Self::Movement {
            x: input.x,
            y: input.y,
        }
    }

    /// The state machine event requested by this input, if any.
    ///
    /// Movement only raises an event when the vertical axis is deflected;
    /// the horizontal axis is consumed continuously by the movement update.
    pub fn combat_event(self) -> Option<CombatEvent> {
        match self {
            Self::Movement { y, .. } if y > 0.0 => Some(CombatEvent::JumpStarted),
            Self::Movement { y, .. } if y < 0.0 => Some(CombatEvent::DuckStarted),
            Self::Movement { .. } => None,
            Self::AttackPressed => Some(CombatEvent::AttackStarted),
            Self::DefendPressed => Some(CombatEvent::DefendStarted),
            Self::DefendReleased => Some(CombatEvent::DefendFinished),
        }
    }
}

/// Completion cues reported by the animation collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AnimationCue {
    JumpFinished,
    /// The strike frame of the attack clip; damage resolves here.
    AttackPerformed,
    AttackFinished,
    HitFinished,
}

impl From<AnimationCue> for CombatEvent {
    fn from(cue: AnimationCue) -> Self {
        match cue {
            AnimationCue::JumpFinished => CombatEvent::JumpFinished,
            AnimationCue::AttackPerformed => CombatEvent::AttackPerformed,
            AnimationCue::AttackFinished => CombatEvent::AttackFinished,
            AnimationCue::HitFinished => CombatEvent::HitFinished,
        }
    }
}
