//! Action states a combatant can occupy.

/// The single active action state of a combatant.
///
/// Exactly one state is active per combatant at any time. States change only
/// through [`crate::Combatant::handle_event`] or the round lifecycle's reset and
/// activation calls.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatState {
    /// Idle baseline used between a reset and the fight call.
    #[default]
    Default,
    /// Standing or walking; the only state that accepts new actions.
    IdleMove,
    Jumping,
    Ducking,
    Attacking,
    Defending,
    /// Reeling from a landed hit.
    Hit,
    Dead,
}

impl CombatState {
    /// Returns true for every state except [`CombatState::Dead`].
    #[inline]
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Dead)
    }

    /// States whose entry zeroes the animator speed so the combatant does not
    /// slide while performing the action.
    #[inline]
    pub const fn freezes_movement(self) -> bool {
        matches!(self, Self::Attacking | Self::Defending | Self::Hit)
    }
}
