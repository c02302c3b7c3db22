//! Session engine: the single mutator of a match.
//!
//! [`ArenaEngine`] bundles the roster, the [`MatchController`] and the pause
//! and quit flags. Every collaborator notification and every simulation tick
//! goes through it, and every presentation side effect is requested from the
//! [`Presentation`] passed into the call.

mod controller;
mod score;

pub use controller::{MatchController, MatchEvent, MatchPhase, Round};
pub use score::ScoreKeeper;

use crate::arena::Arena;
use crate::combat::{AnimationCue, CombatEvent, InputEvent};
use crate::config::{ArenaConfig, CombatantSpec};
use crate::env::{MenuKind, Presentation};
use crate::error::ArenaError;
use crate::snapshot::ArenaSnapshot;
use crate::state::CombatantId;

/// What happened during one [`ArenaEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    /// False when the tick was skipped because the session is paused or quit.
    pub advanced: bool,
    pub events: Vec<MatchEvent>,
}

impl TickOutcome {
    fn skipped() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug)]
pub struct ArenaEngine {
    arena: Arena,
    controller: MatchController,
    paused: bool,
    quit: bool,
}

impl ArenaEngine {
    /// Builds a session. Every combatant starts in `Default`; the first round
    /// is set up on the first tick.
    pub fn new(config: ArenaConfig, specs: &[CombatantSpec]) -> Result<Self, ArenaError> {
        config.validate()?;
        let arena = Arena::new(specs)?;
        let controller = MatchController::new(config, &arena);

        tracing::debug!(
            combatants = arena.len(),
            rounds_to_win = controller.score().rounds_to_win(),
            "arena session created"
        );

        Ok(Self {
            arena,
            controller,
            paused: false,
            quit: false,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn config(&self) -> &ArenaConfig {
        self.controller.config()
    }

    pub fn phase(&self) -> MatchPhase {
        self.controller.phase()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Advances the session by `dt` seconds: every combatant's continuous
    /// update in roster order, then the match controller.
    pub fn tick(&mut self, dt: f32, fx: &mut dyn Presentation) -> TickOutcome {
        if self.paused || self.quit {
            return TickOutcome::skipped();
        }

        let mut events = Vec::new();
        self.arena.update(dt, fx);
        self.controller.tick(dt, &mut self.arena, fx, &mut events);

        TickOutcome {
            advanced: true,
            events,
        }
    }

    /// Returns false when the combatant's input is currently disabled.
    pub fn apply_input(
        &mut self,
        id: CombatantId,
        input: InputEvent,
        fx: &mut dyn Presentation,
    ) -> Result<bool, ArenaError> {
        self.arena.apply_input(id, input, fx)
    }

    /// Ignored while paused or quit.
    pub fn animation_cue(
        &mut self,
        id: CombatantId,
        cue: AnimationCue,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        if self.is_frozen_for(id)? {
            tracing::trace!(combatant = %id, %cue, "session frozen, dropping animation cue");
            return Ok(());
        }
        self.arena.animation_cue(id, cue, fx)
    }

    pub fn collision_began(&mut self, id: CombatantId, other: CombatantId) -> Result<(), ArenaError> {
        self.arena.collision_began(id, other)
    }

    pub fn collision_ended(
        &mut self,
        id: CombatantId,
        other: CombatantId,
    ) -> Result<bool, ArenaError> {
        self.arena.collision_ended(id, other)
    }

    /// Ignored while paused or quit.
    pub fn dispatch(
        &mut self,
        id: CombatantId,
        event: CombatEvent,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        if self.is_frozen_for(id)? {
            tracing::trace!(combatant = %id, %event, "session frozen, dropping event");
            return Ok(());
        }
        self.arena.dispatch(id, event, fx)
    }

    /// Unknown codes fail even while the session is frozen.
    pub fn dispatch_code(
        &mut self,
        id: CombatantId,
        code: u8,
        fx: &mut dyn Presentation,
    ) -> Result<(), ArenaError> {
        let event = CombatEvent::from_code(code)?;
        if self.is_frozen_for(id)? {
            tracing::trace!(combatant = %id, %event, "session frozen, dropping event");
            return Ok(());
        }
        self.arena.dispatch_code(id, code, fx)
    }

    /// Pause and quit freeze every state machine, not just the clock. Unknown
    /// ids are still rejected.
    fn is_frozen_for(&self, id: CombatantId) -> Result<bool, ArenaError> {
        self.arena.get(id)?;
        Ok(self.paused || self.quit)
    }

    /// Flips the pause flag and returns the new value.
    ///
    /// Only a round in progress can be paused. Pausing disables input for the
    /// whole roster and shows the pause menu; resuming undoes both.
    pub fn toggle_pause(&mut self, fx: &mut dyn Presentation) -> Result<bool, ArenaError> {
        let phase = self.phase();
        if phase != MatchPhase::Playing || self.quit {
            return Err(ArenaError::PauseUnavailable { phase });
        }

        self.paused = !self.paused;
        self.arena.set_input_all(!self.paused);
        fx.show_menu(MenuKind::Pause, self.paused);
        fx.show_notice(if self.paused { "Pause" } else { "" });

        tracing::debug!(paused = self.paused, "pause toggled");
        Ok(self.paused)
    }

    /// Starts over from round one with fresh scores. Ignored after
    /// [`ArenaEngine::quit`].
    pub fn restart(&mut self, fx: &mut dyn Presentation) -> Vec<MatchEvent> {
        if self.quit {
            tracing::warn!("restart requested after quit, ignoring");
            return Vec::new();
        }

        if self.paused {
            self.paused = false;
            fx.show_menu(MenuKind::Pause, false);
        }

        let mut events = vec![MatchEvent::Restarted];
        self.controller.restart(&mut self.arena, fx, &mut events);
        tracing::info!("match restarted");
        events
    }

    /// Ends the session. Further ticks are no-ops.
    pub fn quit(&mut self) {
        if !self.quit {
            self.quit = true;
            self.arena.set_input_all(false);
            tracing::info!(phase = %self.phase(), "session quit");
        }
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatState;
    use crate::env::{NullPresentation, PresentationLog, PresentationRequest};
    use crate::state::Position;

    const A: CombatantId = CombatantId(0);
    const B: CombatantId = CombatantId(1);
    const DT: f32 = 0.5;

    fn engine(config: ArenaConfig) -> ArenaEngine {
        ArenaEngine::new(
            config,
            &[
                CombatantSpec::new("Ayla", Position::new(-2.0, 0.0)),
                CombatantSpec::new("Bram", Position::new(2.0, 0.0)),
            ],
        )
        .expect("valid roster")
    }

    /// Ticks until the phase changes to `phase`, collecting match events.
    fn run_until(
        engine: &mut ArenaEngine,
        phase: MatchPhase,
        fx: &mut dyn Presentation,
    ) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        for _ in 0..1_000 {
            if engine.phase() == phase {
                return events;
            }
            events.extend(engine.tick(DT, fx).events);
        }
        panic!("never reached {phase}");
    }

    /// Lands one unblocked hit from `attacker` on `target` with full cue sequence.
    fn land_hit(engine: &mut ArenaEngine, attacker: CombatantId, target: CombatantId) {
        let fx = &mut NullPresentation;
        engine.collision_began(attacker, target).unwrap();
        assert!(engine.apply_input(attacker, InputEvent::AttackPressed, fx).unwrap());
        engine
            .animation_cue(attacker, AnimationCue::AttackPerformed, fx)
            .unwrap();
        engine.animation_cue(target, AnimationCue::HitFinished, fx).unwrap();
        engine
            .animation_cue(attacker, AnimationCue::AttackFinished, fx)
            .unwrap();
    }

    fn knock_out(engine: &mut ArenaEngine, attacker: CombatantId, target: CombatantId) {
        for _ in 0..10 {
            land_hit(engine, attacker, target);
        }
    }

    #[test]
    fn first_round_is_announced_before_input_opens() {
        let mut log = PresentationLog::new();
        let mut engine = engine(ArenaConfig::default());

        let events = run_until(&mut engine, MatchPhase::Playing, &mut log);

        assert_eq!(
            events,
            vec![
                MatchEvent::RoundStarted { round: 1 },
                MatchEvent::Fight { round: 1 }
            ]
        );
        assert_eq!(log.notices().collect::<Vec<_>>(), vec!["Round 1", "Fight!", ""]);
        assert!(engine.arena().combatants().iter().all(|c| c.input_enabled()));
        assert!(
            engine
                .arena()
                .combatants()
                .iter()
                .all(|c| c.state() == CombatState::IdleMove)
        );
    }

    #[test]
    fn input_is_dropped_during_intro() {
        let mut engine = engine(ArenaConfig::default());
        engine.tick(DT, &mut NullPresentation);

        let accepted = engine
            .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
            .unwrap();

        assert!(!accepted);
        assert_eq!(engine.arena().get(A).unwrap().state(), CombatState::Default);
    }

    #[test]
    fn ten_hits_knock_out_and_win_the_round() {
        let mut log = PresentationLog::new();
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut log);

        for _ in 0..9 {
            land_hit(&mut engine, A, B);
        }
        let bram = engine.arena().get(B).unwrap();
        assert_eq!(bram.health(), 1);
        assert_ne!(bram.state(), CombatState::Dead);

        // Tenth strike: health hits zero on impact, death waits for the clip.
        engine.collision_began(A, B).unwrap();
        assert!(engine.apply_input(A, InputEvent::AttackPressed, &mut log).unwrap());
        engine
            .animation_cue(A, AnimationCue::AttackPerformed, &mut log)
            .unwrap();
        assert_eq!(engine.arena().get(B).unwrap().health(), 0);
        assert_eq!(engine.arena().get(B).unwrap().state(), CombatState::Hit);

        engine.tick(DT, &mut log);
        assert_eq!(engine.phase(), MatchPhase::Playing);
        assert_eq!(engine.arena().get(B).unwrap().state(), CombatState::Hit);

        engine.animation_cue(B, AnimationCue::HitFinished, &mut log).unwrap();
        assert_eq!(engine.arena().get(B).unwrap().state(), CombatState::Dead);

        let outcome = engine.tick(DT, &mut log);

        assert_eq!(
            outcome.events,
            vec![MatchEvent::RoundEnded {
                round: 1,
                winner: Some(A)
            }]
        );
        assert_eq!(engine.phase(), MatchPhase::Ending);
        assert_eq!(engine.controller().score().wins(A), 1);
        assert_eq!(engine.controller().round().winner, Some(A));
        assert_eq!(log.notices().last(), Some("Ayla wins the round"));
        assert!(!engine.arena().get(A).unwrap().input_enabled());
    }

    #[test]
    fn timeout_with_everyone_standing_is_a_draw() {
        let mut log = PresentationLog::new();
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut log);

        let mut ticks = 0;
        while engine.phase() == MatchPhase::Playing {
            engine.tick(DT, &mut log);
            ticks += 1;
        }

        assert_eq!(ticks, 120);
        assert_eq!(engine.controller().round().winner, None);
        assert_eq!(engine.controller().score().wins(A), 0);
        assert_eq!(engine.controller().score().wins(B), 0);
        assert_eq!(log.notices().last(), Some("Draw"));
        assert_eq!(log.last_timer(), Some(0.0));
    }

    #[test]
    fn displayed_timer_never_goes_negative() {
        let mut log = PresentationLog::new();
        let mut engine = engine(ArenaConfig::default().with_round_duration(1.0));
        run_until(&mut engine, MatchPhase::Playing, &mut log);

        engine.tick(0.75, &mut log);
        engine.tick(0.75, &mut log);

        assert_eq!(engine.phase(), MatchPhase::Ending);
        assert_eq!(engine.controller().round().remaining, 0.0);
        for request in log.requests() {
            if let PresentationRequest::Timer { seconds } = request {
                assert!(*seconds >= 0.0);
            }
        }
    }

    #[test]
    fn knockout_on_final_tick_beats_timeout() {
        let mut engine = engine(ArenaConfig::default().with_round_duration(DT));
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);

        knock_out(&mut engine, B, A);
        let outcome = engine.tick(DT, &mut NullPresentation);

        assert_eq!(
            outcome.events,
            vec![MatchEvent::RoundEnded {
                round: 1,
                winner: Some(B)
            }]
        );
    }

    #[test]
    fn double_knockout_is_a_draw() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);

        engine
            .dispatch(A, CombatEvent::DeadStarted, &mut NullPresentation)
            .unwrap();
        engine
            .dispatch(B, CombatEvent::DeadStarted, &mut NullPresentation)
            .unwrap();
        engine.tick(DT, &mut NullPresentation);

        assert_eq!(engine.phase(), MatchPhase::Ending);
        assert_eq!(engine.controller().round().winner, None);
    }

    #[test]
    fn match_ends_at_threshold_without_another_round() {
        let mut log = PresentationLog::new();
        let mut engine = engine(ArenaConfig::default());

        for round in 1..=2 {
            run_until(&mut engine, MatchPhase::Playing, &mut log);
            assert_eq!(engine.controller().round().number, round);
            knock_out(&mut engine, A, B);
            engine.tick(DT, &mut log);
            assert_eq!(engine.phase(), MatchPhase::Ending);
        }

        let events = run_until(&mut engine, MatchPhase::MatchEnded, &mut log);

        assert_eq!(events, vec![MatchEvent::MatchEnded { winner: A }]);
        assert_eq!(engine.controller().round().number, 2);
        assert_eq!(log.notices().last(), Some("Ayla wins!"));
        assert!(log.requests().contains(&PresentationRequest::Menu {
            menu: MenuKind::MatchOver,
            visible: true
        }));

        for _ in 0..20 {
            assert!(engine.tick(DT, &mut log).events.is_empty());
        }
        assert_eq!(engine.phase(), MatchPhase::MatchEnded);
    }

    #[test]
    fn next_round_resets_combatants() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);
        knock_out(&mut engine, A, B);
        engine.tick(DT, &mut NullPresentation);

        run_until(&mut engine, MatchPhase::Starting, &mut NullPresentation);

        assert_eq!(engine.controller().round().number, 2);
        let bram = engine.arena().get(B).unwrap();
        assert_eq!(bram.health(), bram.max_health());
        assert_eq!(bram.state(), CombatState::Default);
        assert_eq!(bram.position(), bram.spawn());
    }

    #[test]
    fn pause_is_only_available_while_playing() {
        let mut engine = engine(ArenaConfig::default());
        assert_eq!(
            engine.toggle_pause(&mut NullPresentation),
            Err(ArenaError::PauseUnavailable {
                phase: MatchPhase::Starting
            })
        );

        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);
        let mut log = PresentationLog::new();
        assert_eq!(engine.toggle_pause(&mut log), Ok(true));
        assert_eq!(log.notices().collect::<Vec<_>>(), vec!["Pause"]);
        assert!(log.requests().contains(&PresentationRequest::Menu {
            menu: MenuKind::Pause,
            visible: true
        }));
    }

    #[test]
    fn pause_freezes_ticks_and_input() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);
        let before = engine.controller().round().remaining;

        engine.toggle_pause(&mut NullPresentation).unwrap();
        for _ in 0..10 {
            assert!(!engine.tick(DT, &mut NullPresentation).advanced);
        }
        assert_eq!(engine.controller().round().remaining, before);
        assert!(
            !engine
                .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
                .unwrap()
        );

        assert_eq!(engine.toggle_pause(&mut NullPresentation), Ok(false));
        assert!(
            engine
                .apply_input(A, InputEvent::AttackPressed, &mut NullPresentation)
                .unwrap()
        );
        assert!(engine.tick(DT, &mut NullPresentation).advanced);
    }

    #[test]
    fn pause_freezes_combat_events() {
        let mut engine = engine(ArenaConfig::default());
        let fx = &mut NullPresentation;
        run_until(&mut engine, MatchPhase::Playing, fx);
        engine.collision_began(A, B).unwrap();
        assert!(engine.apply_input(A, InputEvent::AttackPressed, fx).unwrap());

        assert_eq!(engine.toggle_pause(fx), Ok(true));
        engine.animation_cue(A, AnimationCue::AttackPerformed, fx).unwrap();
        engine.dispatch(A, CombatEvent::DeadStarted, fx).unwrap();
        engine
            .dispatch_code(B, CombatEvent::DeadStarted.code(), fx)
            .unwrap();

        assert_eq!(engine.arena().get(B).unwrap().health(), 10);
        assert_eq!(engine.arena().get(B).unwrap().state(), CombatState::IdleMove);
        assert_eq!(engine.arena().get(A).unwrap().state(), CombatState::Attacking);
        assert_eq!(
            engine.dispatch_code(A, 99, fx),
            Err(ArenaError::InvalidEvent { code: 99 })
        );
        assert_eq!(
            engine.animation_cue(CombatantId(5), AnimationCue::HitFinished, fx),
            Err(ArenaError::UnknownCombatant(CombatantId(5)))
        );

        // The strike frame lands once the round resumes.
        assert_eq!(engine.toggle_pause(fx), Ok(false));
        engine.animation_cue(A, AnimationCue::AttackPerformed, fx).unwrap();
        assert_eq!(engine.arena().get(B).unwrap().health(), 9);
    }

    #[test]
    fn quit_freezes_combat_events() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);

        engine.quit();
        engine
            .dispatch(B, CombatEvent::DeadStarted, &mut NullPresentation)
            .unwrap();

        assert_eq!(engine.arena().get(B).unwrap().state(), CombatState::IdleMove);
    }

    #[test]
    fn malformed_config_is_rejected() {
        let specs = [
            CombatantSpec::new("Ayla", Position::ORIGIN),
            CombatantSpec::new("Bram", Position::ORIGIN),
        ];

        let result = ArenaEngine::new(ArenaConfig::default().with_round_duration(f32::NAN), &specs);

        assert_eq!(
            result.err(),
            Some(ArenaError::InvalidConfig {
                field: "round_duration".to_owned()
            })
        );
    }

    #[test]
    fn restart_returns_to_round_one_with_clean_scores() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);
        knock_out(&mut engine, A, B);
        engine.tick(DT, &mut NullPresentation);
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);
        engine.toggle_pause(&mut NullPresentation).unwrap();

        let events = engine.restart(&mut NullPresentation);

        assert_eq!(
            events,
            vec![MatchEvent::Restarted, MatchEvent::RoundStarted { round: 1 }]
        );
        assert!(!engine.is_paused());
        assert_eq!(engine.phase(), MatchPhase::Starting);
        assert_eq!(engine.controller().round().number, 1);
        assert_eq!(engine.controller().score().wins(A), 0);
        assert_eq!(engine.arena().get(B).unwrap().health(), 10);
    }

    #[test]
    fn quit_stops_the_session() {
        let mut engine = engine(ArenaConfig::default());
        run_until(&mut engine, MatchPhase::Playing, &mut NullPresentation);

        engine.quit();

        assert!(engine.is_quit());
        assert!(!engine.tick(DT, &mut NullPresentation).advanced);
        assert!(engine.restart(&mut NullPresentation).is_empty());
        assert!(engine.toggle_pause(&mut NullPresentation).is_err());
    }
}
