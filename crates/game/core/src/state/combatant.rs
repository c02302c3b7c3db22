use super::{CombatantId, MoveInput, Position};
use crate::combat::{CombatState, health_fraction};
use crate::config::CombatantSpec;
use crate::env::{Pose, Presentation};

/// One participant in the match.
///
/// # Invariants
///
/// - `health` stays within `0..=max_health`
/// - `state` changes only through the combat state machine
///   ([`Combatant::handle_event`], [`Combatant::enter`]) or [`Combatant::reset`]
/// - `colliding` is a non-owning relation maintained by collision notifications
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub(crate) id: CombatantId,
    pub(crate) name: String,

    pub(crate) max_health: u32,
    pub(crate) health: u32,
    pub(crate) damage_per_hit: u32,
    pub(crate) move_speed: f32,

    pub(crate) state: CombatState,
    pub(crate) pose: Pose,

    /// Opponent currently touching this combatant, as reported by the
    /// collision collaborator.
    pub(crate) colliding: Option<CombatantId>,

    pub(crate) move_input: MoveInput,
    pub(crate) input_enabled: bool,

    pub(crate) spawn: Position,
    pub(crate) position: Position,
}

impl Combatant {
    /// Creates a combatant at its spawn point with full health, input
    /// disabled, in [`CombatState::Default`].
    pub fn from_spec(id: CombatantId, spec: &CombatantSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            max_health: spec.max_health,
            health: spec.max_health,
            damage_per_hit: spec.damage_per_hit,
            move_speed: spec.move_speed,
            state: CombatState::Default,
            pose: Pose::empty(),
            colliding: None,
            move_input: MoveInput::NEUTRAL,
            input_enabled: false,
            spawn: spec.spawn,
            position: spec.spawn,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn damage_per_hit(&self) -> u32 {
        self.damage_per_hit
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn colliding(&self) -> Option<CombatantId> {
        self.colliding
    }

    pub fn move_input(&self) -> MoveInput {
        self.move_input
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn spawn(&self) -> Position {
        self.spawn
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Quick check used by round-winner detection.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Health bar fill in `0.0..=1.0`.
    pub fn health_fraction(&self) -> f32 {
        health_fraction(self.health, self.max_health)
    }

    /// Puts the combatant back to its round-start condition.
    ///
    /// Idempotent: state `Default`, position at spawn, full health, neutral
    /// input with input disabled, every pose lowered and the animator speed
    /// zeroed. The collision relation is left to the collision collaborator.
    pub fn reset(&mut self, fx: &mut dyn Presentation) {
        self.enter(CombatState::Default, fx);

        self.position = self.spawn;
        self.health = self.max_health;
        self.set_input_enabled(false);

        self.pose = Pose::empty();
        fx.set_speed(self.id, 0.0);
        fx.set_pose(self.id, Pose::all(), false);
        fx.show_health(self.id, self.health_fraction());
    }

    /// Enables or disables input delivery. Disabling also drops the held
    /// movement vector so the combatant stops walking.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
        if !enabled {
            self.move_input = MoveInput::NEUTRAL;
        }
    }

    pub(crate) fn set_move_input(&mut self, input: MoveInput) {
        self.move_input = input;
    }

    pub(crate) fn begin_collision(&mut self, other: CombatantId) {
        self.colliding = Some(other);
    }

    /// Clears the relation only if it still points at `other`.
    pub(crate) fn end_collision(&mut self, other: CombatantId) -> bool {
        if self.colliding == Some(other) {
            self.colliding = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn hold_pose(&mut self, pose: Pose, held: bool, fx: &mut dyn Presentation) {
        self.pose.set(pose, held);
        fx.set_pose(self.id, pose, held);
    }
}
