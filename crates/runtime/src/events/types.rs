//! Event types for different topics.

use arena_core::{MatchEvent, PresentationRequest};
use serde::{Deserialize, Serialize};

/// A presentation request produced by the engine, stamped with the tick
/// counter at the time it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationEvent {
    pub tick: u64,
    pub request: PresentationRequest,
}

/// A match milestone (round start, fight call, round result, match result,
/// pause, restart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub tick: u64,
    pub event: MatchEvent,
}
