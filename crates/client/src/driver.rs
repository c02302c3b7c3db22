//! Headless driver: plays a scripted bout against the runtime.

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::TryRecvError};

use arena_content::{Scenario, ScriptedAction};
use arena_core::{ArenaSnapshot, MatchPhase, PresentationRequest};
use arena_runtime::{Event, RuntimeHandle, Topic};

use crate::cues::CueScheduler;

pub struct Driver {
    handle: RuntimeHandle,
    scenario: Scenario,
    dt: f32,
    cues: CueScheduler,
    presentation: broadcast::Receiver<Event>,
    /// Scripted time; keeps running while the session is paused.
    now: f32,
    /// Animation time; only runs on ticks that advanced the session.
    clip_time: f32,
}

impl Driver {
    /// `dt` overrides the scenario's own step when given.
    pub fn new(handle: RuntimeHandle, scenario: Scenario, dt: Option<f32>) -> Self {
        let presentation = handle.subscribe(Topic::Presentation);
        Self {
            dt: dt.unwrap_or(scenario.dt),
            handle,
            scenario,
            cues: CueScheduler::default(),
            presentation,
            now: 0.0,
            clip_time: 0.0,
        }
    }

    /// Runs until the match ends, the scenario quits, or its duration elapses.
    /// Returns the final snapshot.
    pub async fn run(mut self) -> Result<ArenaSnapshot> {
        tracing::info!(scenario = %self.scenario.name, dt = self.dt, "starting scripted bout");

        while self.now < self.scenario.duration {
            let next = self.now + self.dt;
            let actions: Vec<ScriptedAction> =
                self.scenario.due(self.now, next).copied().collect();
            for action in actions {
                if !self.apply(action).await? {
                    return self.finish().await;
                }
            }

            let report = self.handle.step(self.dt).await?;
            self.now = next;
            if report.advanced {
                self.clip_time += self.dt;
            }
            self.pump_presentation();

            for (id, cue) in self.cues.due(self.clip_time) {
                self.handle.animation_cue(id, cue).await?;
                self.pump_presentation();
            }

            if report.phase == MatchPhase::MatchEnded {
                break;
            }
        }

        self.finish().await
    }

    /// Applies one scripted step. Returns false once the scenario quits.
    async fn apply(&mut self, action: ScriptedAction) -> Result<bool> {
        tracing::debug!(at = self.now, ?action, "scripted step");

        if let Some((id, input)) = action.input() {
            let accepted = self.handle.input(id, input).await?;
            if !accepted {
                tracing::debug!(combatant = %id, ?input, "input dropped while disabled");
            }
        } else {
            match action {
                ScriptedAction::Touch { combatant, other } => {
                    self.handle.collision_began(combatant, other).await?;
                }
                ScriptedAction::Separate { combatant, other } => {
                    self.handle.collision_ended(combatant, other).await?;
                }
                ScriptedAction::Pause => match self.handle.toggle_pause().await {
                    Ok(paused) => tracing::info!(paused, "pause toggled"),
                    Err(err) => tracing::warn!(error = %err, "pause rejected"),
                },
                ScriptedAction::Restart => {
                    self.handle.restart().await?;
                }
                ScriptedAction::Quit => {
                    self.handle.quit().await?;
                    return Ok(false);
                }
                ScriptedAction::Move { .. }
                | ScriptedAction::Attack { .. }
                | ScriptedAction::Defend { .. }
                | ScriptedAction::Release { .. } => {}
            }
        }

        self.pump_presentation();
        Ok(true)
    }

    /// Drains presentation events published so far into the cue scheduler
    /// and the log.
    fn pump_presentation(&mut self) {
        loop {
            match self.presentation.try_recv() {
                Ok(Event::Presentation(event)) => {
                    match &event.request {
                        PresentationRequest::Notice { text } if !text.is_empty() => {
                            tracing::info!(at = self.now, "{text}");
                        }
                        PresentationRequest::Sound { source, cue } => {
                            tracing::debug!(at = self.now, ?source, sound = cue.key(), "sound");
                        }
                        _ => {}
                    }
                    self.cues.observe(self.clip_time, &event.request);
                }
                Ok(Event::Match(_)) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "presentation events lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    async fn finish(self) -> Result<ArenaSnapshot> {
        let snapshot = self
            .handle
            .snapshot()
            .await
            .context("Failed to read final snapshot")?;
        tracing::info!(
            at = self.now,
            phase = %snapshot.phase,
            winner = ?snapshot.match_winner,
            "bout finished"
        );
        Ok(snapshot)
    }
}
