//! Round sequencing as an explicit phase machine.
//!
//! ```text
//! Starting(intro) -> Starting(fight call) -> Playing -> Ending -> Starting(intro)
//!                                                             \-> MatchEnded
//! ```
//!
//! Every timed wait is a countdown stored in the phase itself and advanced by
//! [`MatchController::tick`], so pausing the session (not ticking) freezes
//! the sequence exactly where it is.

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::env::{MenuKind, Presentation, SoundCue};
use crate::state::CombatantId;

use super::score::ScoreKeeper;

/// Coarse phase of the match, as reported to collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MatchPhase {
    Starting,
    Playing,
    Ending,
    MatchEnded,
}

/// Match-level milestones raised during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MatchEvent {
    RoundStarted { round: u32 },
    Fight { round: u32 },
    RoundEnded { round: u32, winner: Option<CombatantId> },
    MatchEnded { winner: CombatantId },
    Paused,
    Resumed,
    Restarted,
}

/// The round currently being fought (or about to be).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// 1-based round number.
    pub number: u32,
    /// Seconds left, clamped at zero.
    pub remaining: f32,
    /// `None` until the round ends, and still `None` after a draw.
    pub winner: Option<CombatantId>,
    pub active: bool,
}

impl Round {
    fn first(duration: f32) -> Self {
        Self {
            number: 1,
            remaining: duration,
            winner: None,
            active: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Built but the first round has not been set up yet.
    Pending,
    /// "Round N" is on screen.
    Intro { remaining: f32 },
    /// "Fight!" is on screen.
    FightCall { remaining: f32 },
    Playing,
    Ending { remaining: f32 },
    MatchEnded,
}

/// Drives rounds and owns the [`Round`] record and the [`ScoreKeeper`].
#[derive(Clone, Debug)]
pub struct MatchController {
    config: ArenaConfig,
    round: Round,
    score: ScoreKeeper,
    phase: Phase,
}

impl MatchController {
    pub fn new(config: ArenaConfig, arena: &Arena) -> Self {
        Self {
            round: Round::first(config.round_duration),
            score: ScoreKeeper::new(arena.ids(), config.rounds_to_win),
            phase: Phase::Pending,
            config,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn score(&self) -> &ScoreKeeper {
        &self.score
    }

    pub fn phase(&self) -> MatchPhase {
        match self.phase {
            Phase::Pending | Phase::Intro { .. } | Phase::FightCall { .. } => MatchPhase::Starting,
            Phase::Playing => MatchPhase::Playing,
            Phase::Ending { .. } => MatchPhase::Ending,
            Phase::MatchEnded => MatchPhase::MatchEnded,
        }
    }

    /// Advances the current phase by `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        match self.phase {
            Phase::Pending => self.begin_round(arena, fx, events),
            Phase::Intro { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::Intro { remaining };
                } else {
                    fx.show_notice("Fight!");
                    fx.play(None, SoundCue::Fight);
                    self.enter(Phase::FightCall {
                        remaining: self.config.fight_notice_delay,
                    });
                }
            }
            Phase::FightCall { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::FightCall { remaining };
                } else {
                    self.start_fight(arena, fx, events);
                }
            }
            Phase::Playing => self.tick_playing(dt, arena, fx, events),
            Phase::Ending { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::Ending { remaining };
                } else {
                    self.finish_round(arena, fx, events);
                }
            }
            Phase::MatchEnded => {}
        }
    }

    /// Back to round one with a clean scoreboard.
    pub fn restart(
        &mut self,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        self.score.reset();
        self.round = Round::first(self.config.round_duration);
        fx.show_menu(MenuKind::MatchOver, false);
        self.begin_round(arena, fx, events);
    }

    /// Starting entry: the only place combatants are reset.
    fn begin_round(
        &mut self,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        self.round.winner = None;
        self.round.active = false;
        self.round.remaining = self.config.round_duration;
        fx.show_timer(self.round.remaining);

        arena.reset_all(fx);

        fx.show_notice(&format!("Round {}", self.round.number));
        fx.play(None, SoundCue::Round);
        events.push(MatchEvent::RoundStarted {
            round: self.round.number,
        });

        self.enter(Phase::Intro {
            remaining: self.config.round_intro_delay,
        });
    }

    fn start_fight(
        &mut self,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        fx.show_notice("");
        arena.set_input_all(true);
        arena.activate_all(fx);

        self.round.active = true;
        events.push(MatchEvent::Fight {
            round: self.round.number,
        });
        self.enter(Phase::Playing);
    }

    fn tick_playing(
        &mut self,
        dt: f32,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        self.round.remaining = (self.round.remaining - dt).max(0.0);
        fx.show_timer(self.round.remaining);

        // Survivors first: a knockout on the last tick still counts.
        let (first, more_than_one) = {
            let mut alive = arena.alive();
            (alive.next(), alive.next().is_some())
        };

        if !more_than_one {
            self.end_round(first, arena, fx, events);
        } else if self.round.remaining <= 0.0 {
            self.end_round(None, arena, fx, events);
        }
    }

    fn end_round(
        &mut self,
        winner: Option<CombatantId>,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        self.round.active = false;
        self.round.winner = winner;
        arena.set_input_all(false);

        match winner {
            Some(id) => {
                let wins = self.score.record_round_win(id).unwrap_or_default();
                let name = arena.name_of(id);
                fx.show_notice(&format!("{name} wins the round"));
                fx.play(None, SoundCue::Win);
                tracing::info!(round = self.round.number, winner = %name, wins, "round won");
            }
            None => {
                fx.show_notice("Draw");
                fx.play(None, SoundCue::Draw);
                tracing::info!(round = self.round.number, "round drawn");
            }
        }

        events.push(MatchEvent::RoundEnded {
            round: self.round.number,
            winner,
        });
        self.enter(Phase::Ending {
            remaining: self.config.round_end_delay,
        });
    }

    fn finish_round(
        &mut self,
        arena: &mut Arena,
        fx: &mut dyn Presentation,
        events: &mut Vec<MatchEvent>,
    ) {
        if let Some(winner) = self.score.match_winner() {
            let name = arena.name_of(winner);
            fx.show_notice(&format!("{name} wins!"));
            fx.show_menu(MenuKind::MatchOver, true);
            tracing::info!(winner = %name, standings = ?self.score.standings(), "match over");
            events.push(MatchEvent::MatchEnded { winner });
            self.enter(Phase::MatchEnded);
        } else {
            self.round.number += 1;
            self.begin_round(arena, fx, events);
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(round = self.round.number, from = ?self.phase, to = ?phase, "match phase");
        self.phase = phase;
    }
}
