//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the arena rules so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::ArenaError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a roster or a prebuilt engine before building")]
    MissingRoster,

    #[error("tick rate must be at least 1 Hz")]
    InvalidTickRate,

    #[error("step delta must be finite and non-negative, got {dt}")]
    InvalidDelta { dt: f32 },

    #[error(transparent)]
    Arena(#[from] ArenaError),
}

impl RuntimeError {
    /// True when the engine reported a broken collaborator contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Arena(err) if err.is_contract_violation())
    }
}
