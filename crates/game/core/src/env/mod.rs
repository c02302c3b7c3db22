//! Outbound collaborator interfaces.
//!
//! The rules never render, play audio or drive animation themselves. Every
//! presentation side effect is requested through the traits in this module,
//! which callers pass in explicitly on each operation:
//!
//! - [`Animator`]: named triggers, pose flags and the locomotion speed float
//! - [`Audio`]: sound cues addressed by string key
//! - [`Hud`]: timer, notices, health bars and menus
//!
//! [`Presentation`] bundles the three so a single collaborator object can be
//! threaded through the engine. [`PresentationLog`] records every request as a
//! [`PresentationRequest`] value, which is how the runtime forwards them to
//! subscribers.

mod log;

pub use log::{NullPresentation, PresentationLog, PresentationRequest};

use bitflags::bitflags;

use crate::state::CombatantId;

/// One-shot animation triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AnimTrigger {
    Jump,
    Attack,
    Hit,
}

bitflags! {
    /// Held animation poses. A combatant can hold several at once (e.g. a
    /// ducking pose that was never lowered before a knockout).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Pose: u8 {
        const DUCKING   = 1 << 0;
        const DEFENDING = 1 << 1;
        const DEAD      = 1 << 2;
    }
}

/// Sound cues understood by the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    /// A landed hit on the receiving combatant.
    Hit,
    /// The attacker's strike connecting.
    Attack,
    /// A hit absorbed by a defending combatant.
    Defend,
    Draw,
    Win,
    /// Round number announcement.
    Round,
    Fight,
}

impl SoundCue {
    /// Asset key used by the audio collaborator.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Menus owned by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MenuKind {
    Pause,
    MatchOver,
}

/// Animation subsystem requests.
pub trait Animator {
    fn trigger(&mut self, id: CombatantId, trigger: AnimTrigger);

    fn set_pose(&mut self, id: CombatantId, pose: Pose, held: bool);

    /// Locomotion blend value, always non-negative.
    fn set_speed(&mut self, id: CombatantId, speed: f32);
}

/// Audio subsystem requests.
pub trait Audio {
    /// Plays a cue. `source` is `None` for match-level announcements.
    fn play(&mut self, source: Option<CombatantId>, cue: SoundCue);
}

/// Presentation (HUD) subsystem requests.
pub trait Hud {
    /// Seconds left in the round, already clamped at zero.
    fn show_timer(&mut self, seconds: f32);

    /// Replaces the notice line. An empty string clears it.
    fn show_notice(&mut self, text: &str);

    /// Health bar fill in `0.0..=1.0`.
    fn show_health(&mut self, id: CombatantId, fraction: f32);

    fn show_menu(&mut self, menu: MenuKind, visible: bool);
}

/// Every outbound collaborator in one object.
pub trait Presentation: Animator + Audio + Hud {}

impl<T: Animator + Audio + Hud + ?Sized> Presentation for T {}
