//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation, forwarding collaborator notifications, or
//! streaming events from specific topics.
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{
    AnimationCue, ArenaSnapshot, CombatantId, InputEvent, MatchEvent, MatchPhase,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Result of one manual [`RuntimeHandle::step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Ticks that advanced the session so far, including this one.
    pub tick: u64,
    /// False while paused or after quit.
    pub advanced: bool,
    pub phase: MatchPhase,
    pub events: Vec<MatchEvent>,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance the simulation by `dt` seconds.
    pub async fn step(&self, dt: f32) -> Result<StepReport> {
        self.request(|reply| Command::Step { dt, reply }).await?
    }

    /// Deliver an input event. Returns false if the combatant's input is
    /// currently disabled and the event was dropped.
    pub async fn input(&self, id: CombatantId, input: InputEvent) -> Result<bool> {
        self.request(|reply| Command::Input { id, input, reply })
            .await?
    }

    pub async fn animation_cue(&self, id: CombatantId, cue: AnimationCue) -> Result<()> {
        self.request(|reply| Command::AnimationCue { id, cue, reply })
            .await?
    }

    pub async fn collision_began(&self, id: CombatantId, other: CombatantId) -> Result<()> {
        self.request(|reply| Command::CollisionBegan { id, other, reply })
            .await?
    }

    /// Returns false if the relation already pointed at someone else.
    pub async fn collision_ended(&self, id: CombatantId, other: CombatantId) -> Result<bool> {
        self.request(|reply| Command::CollisionEnded { id, other, reply })
            .await?
    }

    /// Deliver a raw event code, as produced by external tooling.
    pub async fn dispatch_code(&self, id: CombatantId, code: u8) -> Result<()> {
        self.request(|reply| Command::DispatchCode { id, code, reply })
            .await?
    }

    /// Toggle pause and return the new paused flag.
    pub async fn toggle_pause(&self) -> Result<bool> {
        self.request(|reply| Command::TogglePause { reply }).await?
    }

    pub async fn restart(&self) -> Result<Vec<MatchEvent>> {
        self.request(|reply| Command::Restart { reply }).await
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<ArenaSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub async fn quit(&self) -> Result<()> {
        self.request(|reply| Command::Quit { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Presentation` - Animator, audio and HUD requests
    /// - `Topic::Match` - Round and match milestones
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use arena_runtime::Topic;
    ///
    /// let mut match_rx = handle.subscribe(Topic::Match);
    /// while let Ok(event) = match_rx.recv().await {
    ///     // Handle round results
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
