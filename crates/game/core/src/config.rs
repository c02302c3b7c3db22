use crate::error::ArenaError;
use crate::state::Position;

/// Match configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArenaConfig {
    /// Round wins required to take the match.
    pub rounds_to_win: u32,
    /// Length of a round in seconds.
    pub round_duration: f32,
    /// How long the "Round N" notice stays up before the fight call.
    pub round_intro_delay: f32,
    /// How long the "Fight!" notice stays up before input is enabled.
    pub fight_notice_delay: f32,
    /// Pause between the round result notice and the next round (or match end).
    pub round_end_delay: f32,
}

impl ArenaConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants in a single session.
    pub const MAX_COMBATANTS: usize = 8;
    /// Minimum number of combatants required to run a match.
    pub const MIN_COMBATANTS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROUNDS_TO_WIN: u32 = 2;
    pub const DEFAULT_ROUND_DURATION: f32 = 60.0;
    pub const DEFAULT_ROUND_INTRO_DELAY: f32 = 2.0;
    pub const DEFAULT_FIGHT_NOTICE_DELAY: f32 = 1.0;
    pub const DEFAULT_ROUND_END_DELAY: f32 = 2.0;

    pub fn new() -> Self {
        Self {
            rounds_to_win: Self::DEFAULT_ROUNDS_TO_WIN,
            round_duration: Self::DEFAULT_ROUND_DURATION,
            round_intro_delay: Self::DEFAULT_ROUND_INTRO_DELAY,
            fight_notice_delay: Self::DEFAULT_FIGHT_NOTICE_DELAY,
            round_end_delay: Self::DEFAULT_ROUND_END_DELAY,
        }
    }

    pub fn with_rounds_to_win(mut self, rounds_to_win: u32) -> Self {
        self.rounds_to_win = rounds_to_win;
        self
    }

    pub fn with_round_duration(mut self, round_duration: f32) -> Self {
        self.round_duration = round_duration;
        self
    }

    /// The round duration must be finite and positive, every delay finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let invalid = |field: &str| ArenaError::InvalidConfig {
            field: field.to_owned(),
        };

        if !(self.round_duration.is_finite() && self.round_duration > 0.0) {
            return Err(invalid("round_duration"));
        }
        for (field, delay) in [
            ("round_intro_delay", self.round_intro_delay),
            ("fight_notice_delay", self.fight_notice_delay),
            ("round_end_delay", self.round_end_delay),
        ] {
            if !(delay.is_finite() && delay >= 0.0) {
                return Err(invalid(field));
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Static description of one combatant, used to build the roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawn: Position,
    #[cfg_attr(feature = "serde", serde(default = "CombatantSpec::default_max_health"))]
    pub max_health: u32,
    /// Damage this combatant takes from every landed hit.
    #[cfg_attr(feature = "serde", serde(default = "CombatantSpec::default_damage_per_hit"))]
    pub damage_per_hit: u32,
    /// Horizontal units per second at full stick deflection.
    #[cfg_attr(feature = "serde", serde(default = "CombatantSpec::default_move_speed"))]
    pub move_speed: f32,
}

impl CombatantSpec {
    pub const DEFAULT_MAX_HEALTH: u32 = 10;
    pub const DEFAULT_DAMAGE_PER_HIT: u32 = 1;
    pub const DEFAULT_MOVE_SPEED: f32 = 5.0;

    pub fn new(name: impl Into<String>, spawn: Position) -> Self {
        Self {
            name: name.into(),
            spawn,
            max_health: Self::DEFAULT_MAX_HEALTH,
            damage_per_hit: Self::DEFAULT_DAMAGE_PER_HIT,
            move_speed: Self::DEFAULT_MOVE_SPEED,
        }
    }

    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_damage_per_hit(mut self, damage_per_hit: u32) -> Self {
        self.damage_per_hit = damage_per_hit;
        self
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    #[cfg(feature = "serde")]
    fn default_max_health() -> u32 {
        Self::DEFAULT_MAX_HEALTH
    }

    #[cfg(feature = "serde")]
    fn default_damage_per_hit() -> u32 {
        Self::DEFAULT_DAMAGE_PER_HIT
    }

    #[cfg(feature = "serde")]
    fn default_move_speed() -> f32 {
        Self::DEFAULT_MOVE_SPEED
    }
}
