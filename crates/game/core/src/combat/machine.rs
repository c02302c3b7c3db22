//! Per-combatant action state machine.
//!
//! Three entry points mirror the lifecycle of a state:
//!
//! - [`Combatant::enter`] switches state and runs the new state's entry effects
//! - [`Combatant::update_state`] runs the active state's continuous behavior once per tick
//! - [`Combatant::handle_event`] is the only way to request a transition
//!
//! `handle_event` matches every `(state, event)` pair explicitly. Pairs without
//! a transition are spelled out as no-op arms so that adding a state or an
//! event fails to compile until every table row has been decided.

use super::damage::apply_damage;
use super::resolver::{Raised, resolve_strike};
use super::{CombatEvent, CombatState};
use crate::env::{AnimTrigger, Pose, Presentation, SoundCue};
use crate::state::Combatant;

impl Combatant {
    /// Switches to `next` and runs its entry effects.
    ///
    /// Used by transitions inside the state machine and by the round lifecycle
    /// (reset to `Default`, activation to `IdleMove`).
    pub fn enter(&mut self, next: CombatState, fx: &mut dyn Presentation) {
        let previous = self.state;
        self.state = next;
        tracing::debug!(combatant = %self.id, from = %previous, to = %next, "state transition");
        self.start_state(fx);
    }

    /// Entry effects of the active state.
    fn start_state(&mut self, fx: &mut dyn Presentation) {
        if self.state.freezes_movement() {
            fx.set_speed(self.id, 0.0);
        }

        match self.state {
            CombatState::Default | CombatState::IdleMove => {}
            CombatState::Jumping => fx.trigger(self.id, AnimTrigger::Jump),
            CombatState::Ducking => self.hold_pose(Pose::DUCKING, true, fx),
            CombatState::Attacking => fx.trigger(self.id, AnimTrigger::Attack),
            CombatState::Defending => self.hold_pose(Pose::DEFENDING, true, fx),
            CombatState::Hit => self.take_hit(fx),
            CombatState::Dead => self.hold_pose(Pose::DEAD, true, fx),
        }
    }

    /// Continuous behavior of the active state, called once per tick.
    pub fn update_state(&mut self, dt: f32, fx: &mut dyn Presentation) {
        match self.state {
            CombatState::IdleMove => self.apply_movement(dt, fx),
            CombatState::Ducking => {
                if self.move_input.y >= 0.0 {
                    // Ducking never raises events on others.
                    let _ = self.handle_event(CombatEvent::DuckFinished, fx);
                } else {
                    self.apply_movement(dt, fx);
                }
            }
            CombatState::Default
            | CombatState::Jumping
            | CombatState::Attacking
            | CombatState::Defending
            | CombatState::Hit
            | CombatState::Dead => {}
        }
    }

    /// Handles one event against the transition table.
    ///
    /// Returns the event this combatant raises on another combatant, which
    /// only happens when an attack's strike frame lands on a colliding
    /// opponent. The caller delivers it after this call returns.
    pub fn handle_event(
        &mut self,
        event: CombatEvent,
        fx: &mut dyn Presentation,
    ) -> Option<Raised> {
        use CombatEvent as E;
        use CombatState as S;

        tracing::trace!(combatant = %self.id, state = %self.state, event = %event, "handle event");

        match self.state {
            S::Default => match event {
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::DefendFinished
                | E::HitStarted
                | E::HitFinished
                | E::DeadStarted
                | E::DeadFinished => {}
            },
            S::IdleMove => match event {
                E::JumpStarted => self.enter(S::Jumping, fx),
                E::DuckStarted => self.enter(S::Ducking, fx),
                E::AttackStarted => self.enter(S::Attacking, fx),
                E::DefendStarted => self.enter(S::Defending, fx),
                E::HitStarted => self.enter(S::Hit, fx),
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpFinished
                | E::DuckFinished
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendFinished
                | E::HitFinished
                | E::DeadFinished => {}
            },
            S::Jumping => match event {
                E::JumpFinished => self.enter(S::IdleMove, fx),
                E::HitStarted => self.enter(S::Hit, fx),
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpStarted
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::DefendFinished
                | E::HitFinished
                | E::DeadFinished => {}
            },
            S::Ducking => match event {
                E::DuckFinished => {
                    self.hold_pose(Pose::DUCKING, false, fx);
                    self.enter(S::IdleMove, fx);
                }
                E::HitStarted => self.enter(S::Hit, fx),
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::DefendFinished
                | E::HitFinished
                | E::DeadFinished => {}
            },
            S::Attacking => match event {
                E::AttackPerformed => return resolve_strike(self, fx),
                E::AttackFinished => self.enter(S::IdleMove, fx),
                E::HitStarted => self.enter(S::Hit, fx),
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::DefendStarted
                | E::DefendFinished
                | E::HitFinished
                | E::DeadFinished => {}
            },
            S::Defending => match event {
                E::DefendFinished => {
                    self.hold_pose(Pose::DEFENDING, false, fx);
                    self.enter(S::IdleMove, fx);
                }
                // Blocked: the guard absorbs the hit entirely.
                E::HitStarted => fx.play(Some(self.id), SoundCue::Defend),
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::HitFinished
                | E::DeadFinished => {}
            },
            S::Hit => match event {
                E::HitFinished => {
                    let next = if self.health == 0 { S::Dead } else { S::IdleMove };
                    self.enter(next, fx);
                }
                E::DeadStarted => self.enter(S::Dead, fx),
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::DefendFinished
                | E::HitStarted
                | E::DeadFinished => {}
            },
            S::Dead => match event {
                E::JumpStarted
                | E::JumpFinished
                | E::DuckStarted
                | E::DuckFinished
                | E::AttackStarted
                | E::AttackPerformed
                | E::AttackFinished
                | E::DefendStarted
                | E::DefendFinished
                | E::HitStarted
                | E::HitFinished
                | E::DeadStarted
                | E::DeadFinished => {}
            },
        }

        None
    }

    fn take_hit(&mut self, fx: &mut dyn Presentation) {
        fx.trigger(self.id, AnimTrigger::Hit);
        fx.play(Some(self.id), SoundCue::Hit);

        self.health = apply_damage(self.health, self.damage_per_hit);
        fx.show_health(self.id, self.health_fraction());

        tracing::debug!(
            combatant = %self.id,
            health = self.health,
            max_health = self.max_health,
            "took hit"
        );
    }

    fn apply_movement(&mut self, dt: f32, fx: &mut dyn Presentation) {
        self.position.x += self.move_input.x * self.move_speed * dt;
        fx.set_speed(self.id, self.move_input.x.abs());
    }
}
