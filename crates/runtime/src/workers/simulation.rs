//! Simulation worker that owns the authoritative [`arena_core::ArenaEngine`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them to the engine, and publishes the resulting presentation requests and
//! match milestones on the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error};

use arena_core::{
    AnimationCue, ArenaEngine, ArenaError, ArenaSnapshot, CombatantId, InputEvent, MatchEvent,
    PresentationLog,
};

use crate::api::{Result, RuntimeError, StepReport};
use crate::events::{Event, EventBus, MatchNotification, PresentationEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance the session by `dt` seconds.
    Step {
        dt: f32,
        reply: oneshot::Sender<Result<StepReport>>,
    },
    Input {
        id: CombatantId,
        input: InputEvent,
        reply: oneshot::Sender<Result<bool>>,
    },
    AnimationCue {
        id: CombatantId,
        cue: AnimationCue,
        reply: oneshot::Sender<Result<()>>,
    },
    CollisionBegan {
        id: CombatantId,
        other: CombatantId,
        reply: oneshot::Sender<Result<()>>,
    },
    CollisionEnded {
        id: CombatantId,
        other: CombatantId,
        reply: oneshot::Sender<Result<bool>>,
    },
    DispatchCode {
        id: CombatantId,
        code: u8,
        reply: oneshot::Sender<Result<()>>,
    },
    TogglePause {
        reply: oneshot::Sender<Result<bool>>,
    },
    Restart {
        reply: oneshot::Sender<Vec<MatchEvent>>,
    },
    /// Query a read-only snapshot of the session.
    Snapshot {
        reply: oneshot::Sender<ArenaSnapshot>,
    },
    Quit {
        reply: oneshot::Sender<()>,
    },
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    engine: ArenaEngine,
    fx: PresentationLog,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    /// Fixed step used by the auto-tick timer.
    tick_dt: f32,
    auto_tick: bool,
    /// Number of ticks that actually advanced the session.
    tick: u64,
}

impl SimulationWorker {
    pub fn new(
        engine: ArenaEngine,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_dt: f32,
        auto_tick: bool,
    ) -> Self {
        Self {
            engine,
            fx: PresentationLog::new(),
            command_rx,
            event_bus,
            tick_dt,
            auto_tick,
            tick: 0,
        }
    }

    /// Main worker loop. Ends when every command sender has been dropped.
    pub async fn run(mut self) {
        let mut ticker = self.auto_tick.then(|| {
            let mut interval = tokio::time::interval(Duration::from_secs_f32(self.tick_dt));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = next_tick(&mut ticker) => {
                    let dt = self.tick_dt;
                    self.step(dt);
                }
            }
        }

        debug!(target: "runtime::worker", ticks = self.tick, "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Step { dt, reply } => {
                let result = if dt.is_finite() && dt >= 0.0 {
                    Ok(self.step(dt))
                } else {
                    Err(RuntimeError::InvalidDelta { dt })
                };
                let _ = reply.send(result);
            }
            Command::Input { id, input, reply } => {
                let result = self.engine.apply_input(id, input, &mut self.fx);
                let _ = reply.send(self.finish("input", result));
            }
            Command::AnimationCue { id, cue, reply } => {
                let result = self.engine.animation_cue(id, cue, &mut self.fx);
                let _ = reply.send(self.finish("animation_cue", result));
            }
            Command::CollisionBegan { id, other, reply } => {
                let result = self.engine.collision_began(id, other);
                let _ = reply.send(self.finish("collision_began", result));
            }
            Command::CollisionEnded { id, other, reply } => {
                let result = self.engine.collision_ended(id, other);
                let _ = reply.send(self.finish("collision_ended", result));
            }
            Command::DispatchCode { id, code, reply } => {
                let result = self.engine.dispatch_code(id, code, &mut self.fx);
                let _ = reply.send(self.finish("dispatch_code", result));
            }
            Command::TogglePause { reply } => {
                let result = self.engine.toggle_pause(&mut self.fx);
                if let Ok(paused) = result {
                    let event = if paused {
                        MatchEvent::Paused
                    } else {
                        MatchEvent::Resumed
                    };
                    self.publish_match(event);
                }
                let _ = reply.send(self.finish("toggle_pause", result));
            }
            Command::Restart { reply } => {
                let events = self.engine.restart(&mut self.fx);
                self.flush_presentation();
                for event in &events {
                    self.publish_match(event.clone());
                }
                let _ = reply.send(events);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Command::Quit { reply } => {
                self.engine.quit();
                let _ = reply.send(());
            }
        }
    }

    fn step(&mut self, dt: f32) -> StepReport {
        let outcome = self.engine.tick(dt, &mut self.fx);
        if outcome.advanced {
            self.tick += 1;
        }

        self.flush_presentation();
        for event in &outcome.events {
            self.publish_match(event.clone());
        }

        StepReport {
            tick: self.tick,
            advanced: outcome.advanced,
            phase: self.engine.phase(),
            events: outcome.events,
        }
    }

    /// Publishes buffered presentation requests and maps engine errors.
    fn finish<T>(&mut self, op: &'static str, result: std::result::Result<T, ArenaError>) -> Result<T> {
        self.flush_presentation();

        if let Err(err) = &result {
            if err.is_contract_violation() {
                error!(target: "runtime::worker", op, error = %err, "collaborator contract violation");
            } else {
                debug!(target: "runtime::worker", op, error = %err, "request rejected");
            }
        }
        result.map_err(RuntimeError::from)
    }

    fn flush_presentation(&mut self) {
        let tick = self.tick;
        for request in self.fx.drain() {
            self.event_bus
                .publish(Event::Presentation(PresentationEvent { tick, request }));
        }
    }

    fn publish_match(&self, event: MatchEvent) {
        self.event_bus.publish(Event::Match(MatchNotification {
            tick: self.tick,
            event,
        }));
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
