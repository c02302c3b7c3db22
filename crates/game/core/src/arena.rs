//! The combatant roster and the event dispatcher.
//!
//! [`Arena`] owns every [`Combatant`] and routes collaborator notifications
//! (input, animation cues, collisions, raw event codes) to the right state
//! machine. Delivery goes through a FIFO queue: an event raised while another
//! is being handled (a landed strike raising `HitStarted` on the opponent) is
//! processed after the current `handle_event` call returns.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::combat::{AnimationCue, CombatEvent, CombatState, InputEvent};
use crate::config::{ArenaConfig, CombatantSpec};
use crate::env::Presentation;
use crate::error::ArenaError;
use crate::state::{Combatant, CombatantId, MoveInput};

/// Fixed-capacity roster type.
pub type Roster = ArrayVec<Combatant, { ArenaConfig::MAX_COMBATANTS }>;

#[derive(Clone, Debug)]
pub struct Arena {
    roster: Roster,
    queue: VecDeque<(CombatantId, CombatEvent)>,
}

impl Arena {
    /// Builds the roster in the given order. Identifiers follow roster order.
    pub fn new(specs: &[CombatantSpec]) -> Result<Self, ArenaError> {
        if specs.len() < ArenaConfig::MIN_COMBATANTS {
            return Err(ArenaError::RosterTooSmall { count: specs.len() });
        }

        let mut roster = Roster::new();
        for (index, spec) in specs.iter().enumerate() {
            if roster.iter().any(|existing| existing.name() == spec.name) {
                return Err(ArenaError::DuplicateName(spec.name.clone()));
            }
            let combatant = Combatant::from_spec(CombatantId(index as u32), spec);
            roster.try_push(combatant).map_err(|_| ArenaError::RosterFull {
                capacity: ArenaConfig::MAX_COMBATANTS,
            })?;
        }

        Ok(Self {
            roster,
            queue: VecDeque::new(),
        })
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn ids(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.roster.iter().map(Combatant::id)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn get(&self, id: CombatantId) -> Result<&Combatant, ArenaError> {
        self.roster
            .get(id.index())
            .ok_or(ArenaError::UnknownCombatant(id))
    }

    fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, ArenaError> {
        self.roster
            .get_mut(id.index())
            .ok_or(ArenaError::UnknownCombatant(id))
    }

    /// Display name, falling back to the id for unknown combatants.
    pub fn name_of(&self, id: CombatantId) -> String {
        self.get(id)
            .map(|combatant| combatant.name().to_owned())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Combatants whose state is not `Dead`, in roster order.
    pub fn alive(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.roster
            .iter()
            .filter(|combatant| combatant.is_alive())
            .map(Combatant::id)
    }

    /// Delivers `event` to `id` and then every event raised as a consequence.
    pub fn dispatch(
        &mut self,
        id: CombatantId,
        event: CombatEvent,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        self.get(id)?;
        self.queue.push_back((id, event));

        while let Some((target, event)) = self.queue.pop_front() {
            let Ok(combatant) = self.get_mut(target) else {
                tracing::warn!(target = %target, event = %event, "dropping event for unknown combatant");
                continue;
            };
            if let Some(raised) = combatant.handle_event(event, fx) {
                self.queue.push_back((raised.target, raised.event));
            }
        }

        Ok(())
    }

    /// Decodes a raw event code and dispatches it.
    pub fn dispatch_code(
        &mut self,
        id: CombatantId,
        code: u8,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        let event = CombatEvent::from_code(code)?;
        self.dispatch(id, event, fx)
    }

    /// Applies one input event. Returns false when the combatant's input is
    /// disabled and the event was dropped.
    pub fn apply_input(
        &mut self,
        id: CombatantId,
        input: InputEvent,
        fx: &mut dyn Presentation,
    ) -> Result<bool, ArenaError> {
        let combatant = self.get_mut(id).inspect_err(|_| {
            tracing::warn!(combatant = %id, ?input, "input for unknown combatant");
        })?;

        if !combatant.input_enabled() {
            tracing::trace!(combatant = %id, ?input, "input disabled, dropping");
            return Ok(false);
        }

        if let InputEvent::Movement { x, y } = input {
            combatant.set_move_input(MoveInput::new(x, y));
        }

        if let Some(event) = input.combat_event() {
            self.dispatch(id, event, fx)?;
        }
        Ok(true)
    }

    pub fn animation_cue(
        &mut self,
        id: CombatantId,
        cue: AnimationCue,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        self.dispatch(id, cue.into(), fx).inspect_err(|_| {
            tracing::warn!(combatant = %id, %cue, "animation cue for unknown combatant");
        })
    }

    /// Records that `id` started touching `other`.
    pub fn collision_began(
        &mut self,
        id: CombatantId,
        other: CombatantId,
    ) -> Result<(), ArenaError> {
        self.check_pair(id, other)?;
        self.get_mut(id)?.begin_collision(other);
        tracing::trace!(combatant = %id, other = %other, "collision began");
        Ok(())
    }

    /// Records that `id` stopped touching `other`. Returns false when the
    /// relation already pointed elsewhere and was left untouched.
    pub fn collision_ended(
        &mut self,
        id: CombatantId,
        other: CombatantId,
    ) -> Result<bool, ArenaError> {
        self.check_pair(id, other)?;
        let cleared = self.get_mut(id)?.end_collision(other);
        tracing::trace!(combatant = %id, other = %other, cleared, "collision ended");
        Ok(cleared)
    }

    fn check_pair(&self, id: CombatantId, other: CombatantId) -> Result<(), ArenaError> {
        if id == other {
            tracing::warn!(combatant = %id, "rejecting self collision");
            return Err(ArenaError::SelfCollision(id));
        }
        for candidate in [id, other] {
            if let Err(err) = self.get(candidate) {
                tracing::warn!(combatant = %candidate, "collision with unknown combatant");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Runs every combatant's continuous update in roster order.
    pub fn update(&mut self, dt: f32, fx: &mut dyn Presentation) {
        for combatant in &mut self.roster {
            combatant.update_state(dt, fx);
        }
    }

    pub fn reset_all(&mut self, fx: &mut dyn Presentation) {
        self.queue.clear();
        for combatant in &mut self.roster {
            combatant.reset(fx);
        }
    }

    pub fn set_input_all(&mut self, enabled: bool) {
        for combatant in &mut self.roster {
            combatant.set_input_enabled(enabled);
        }
    }

    /// Moves every combatant into `IdleMove` for the fight call.
    pub fn activate_all(&mut self, fx: &mut dyn Presentation) {
        for combatant in &mut self.roster {
            combatant.enter(CombatState::IdleMove, fx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{NullPresentation, PresentationLog, SoundCue};
    use crate::state::Position;

    const A: CombatantId = CombatantId(0);
    const B: CombatantId = CombatantId(1);

    fn duel() -> Arena {
        let mut arena = Arena::new(&[
            CombatantSpec::new("Ayla", Position::new(-2.0, 0.0)),
            CombatantSpec::new("Bram", Position::new(2.0, 0.0)),
        ])
        .expect("valid roster");
        arena.set_input_all(true);
        arena.activate_all(&mut NullPresentation);
        arena
    }

    #[test]
    fn roster_size_and_names_are_validated() {
        let one = [CombatantSpec::new("Solo", Position::ORIGIN)];
        assert_eq!(
            Arena::new(&one).unwrap_err(),
            ArenaError::RosterTooSmall { count: 1 }
        );

        let twins = [
            CombatantSpec::new("Twin", Position::ORIGIN),
            CombatantSpec::new("Twin", Position::ORIGIN),
        ];
        assert_eq!(
            Arena::new(&twins).unwrap_err(),
            ArenaError::DuplicateName("Twin".into())
        );

        let crowd: Vec<_> = (0..=ArenaConfig::MAX_COMBATANTS)
            .map(|i| CombatantSpec::new(format!("F{i}"), Position::ORIGIN))
            .collect();
        assert_eq!(
            Arena::new(&crowd).unwrap_err(),
            ArenaError::RosterFull {
                capacity: ArenaConfig::MAX_COMBATANTS
            }
        );
    }

    #[test]
    fn landed_strike_is_delivered_after_attacker_finishes_handling() {
        let mut arena = duel();
        arena.collision_began(A, B).unwrap();
        arena
            .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
            .unwrap();

        arena
            .animation_cue(A, AnimationCue::AttackPerformed, &mut NullPresentation)
            .unwrap();

        assert_eq!(arena.get(A).unwrap().state(), CombatState::Attacking);
        assert_eq!(arena.get(B).unwrap().state(), CombatState::Hit);
        assert_eq!(arena.get(B).unwrap().health(), 9);
    }

    #[test]
    fn strike_on_defending_opponent_is_blocked() {
        let mut log = PresentationLog::new();
        let mut arena = duel();
        arena.collision_began(A, B).unwrap();
        arena
            .apply_input(B, InputEvent::DefendPressed, &mut NullPresentation)
            .unwrap();
        arena
            .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
            .unwrap();

        arena
            .dispatch(A, CombatEvent::AttackPerformed, &mut log)
            .unwrap();

        assert_eq!(
            log.sounds().collect::<Vec<_>>(),
            vec![(Some(A), SoundCue::Attack), (Some(B), SoundCue::Defend)]
        );
        assert_eq!(arena.get(B).unwrap().health(), 10);
        assert_eq!(arena.get(B).unwrap().state(), CombatState::Defending);
        assert_eq!(arena.get(A).unwrap().state(), CombatState::Attacking);
    }

    #[test]
    fn whiff_changes_nothing() {
        let mut log = PresentationLog::new();
        let mut arena = duel();
        arena
            .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
            .unwrap();

        arena
            .animation_cue(A, AnimationCue::AttackPerformed, &mut log)
            .unwrap();

        assert!(log.is_empty());
        assert_eq!(arena.get(B).unwrap().health(), 10);
        assert_eq!(arena.get(B).unwrap().state(), CombatState::IdleMove);
    }

    #[test]
    fn disabled_input_is_dropped() {
        let mut arena = duel();
        arena.set_input_all(false);

        let accepted = arena
            .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
            .unwrap();

        assert!(!accepted);
        assert_eq!(arena.get(A).unwrap().state(), CombatState::IdleMove);
    }

    #[test]
    fn movement_input_is_stored_and_vertical_axis_raises_events() {
        let mut arena = duel();

        arena
            .apply_input(A, InputEvent::Movement { x: 1.0, y: 0.0 }, &mut NullPresentation)
            .unwrap();
        assert_eq!(arena.get(A).unwrap().move_input(), MoveInput::new(1.0, 0.0));
        assert_eq!(arena.get(A).unwrap().state(), CombatState::IdleMove);

        arena
            .apply_input(A, InputEvent::Movement { x: 0.0, y: 1.0 }, &mut NullPresentation)
            .unwrap();
        assert_eq!(arena.get(A).unwrap().state(), CombatState::Jumping);
    }

    #[test]
    fn collision_boundary_rejects_bad_pairs() {
        let mut arena = duel();
        assert_eq!(
            arena.collision_began(A, A),
            Err(ArenaError::SelfCollision(A))
        );
        assert_eq!(
            arena.collision_began(A, CombatantId(9)),
            Err(ArenaError::UnknownCombatant(CombatantId(9)))
        );

        arena.collision_began(A, B).unwrap();
        assert_eq!(arena.get(A).unwrap().colliding(), Some(B));
        assert_eq!(arena.collision_ended(A, B), Ok(true));
        assert_eq!(arena.get(A).unwrap().colliding(), None);
    }

    #[test]
    fn unknown_event_code_is_rejected() {
        let mut arena = duel();
        assert_eq!(
            arena.dispatch_code(A, 200, &mut NullPresentation),
            Err(ArenaError::InvalidEvent { code: 200 })
        );
        arena
            .dispatch_code(A, CombatEvent::DefendStarted.code(), &mut NullPresentation)
            .unwrap();
        assert_eq!(arena.get(A).unwrap().state(), CombatState::Defending);
    }

    #[test]
    fn alive_skips_dead_combatants() {
        let mut arena = duel();
        arena
            .dispatch(B, CombatEvent::DeadStarted, &mut NullPresentation)
            .unwrap();
        assert_eq!(arena.alive().collect::<Vec<_>>(), vec![A]);
    }
}
