use super::{AnimTrigger, Animator, Audio, Hud, MenuKind, Pose, SoundCue};
use crate::state::CombatantId;

/// A single presentation request captured by [`PresentationLog`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PresentationRequest {
    AnimTrigger {
        id: CombatantId,
        trigger: AnimTrigger,
    },
    Pose {
        id: CombatantId,
        pose: Pose,
        held: bool,
    },
    Speed {
        id: CombatantId,
        speed: f32,
    },
    Sound {
        source: Option<CombatantId>,
        cue: SoundCue,
    },
    Timer {
        seconds: f32,
    },
    Notice {
        text: String,
    },
    Health {
        id: CombatantId,
        fraction: f32,
    },
    Menu {
        menu: MenuKind,
        visible: bool,
    },
}

/// Presentation collaborator that records requests in order.
#[derive(Clone, Debug, Default)]
pub struct PresentationLog {
    requests: Vec<PresentationRequest>,
}

impl PresentationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[PresentationRequest] {
        &self.requests
    }

    /// Takes every recorded request, leaving the log empty.
    pub fn drain(&mut self) -> Vec<PresentationRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Notices in the order they were shown.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().filter_map(|request| match request {
            PresentationRequest::Notice { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Sound cues in the order they were requested.
    pub fn sounds(&self) -> impl Iterator<Item = (Option<CombatantId>, SoundCue)> + '_ {
        self.requests.iter().filter_map(|request| match request {
            PresentationRequest::Sound { source, cue } => Some((*source, *cue)),
            _ => None,
        })
    }

    /// Most recent timer value pushed to the HUD.
    pub fn last_timer(&self) -> Option<f32> {
        self.requests.iter().rev().find_map(|request| match request {
            PresentationRequest::Timer { seconds } => Some(*seconds),
            _ => None,
        })
    }
}

impl Animator for PresentationLog {
    fn trigger(&mut self, id: CombatantId, trigger: AnimTrigger) {
        self.requests
            .push(PresentationRequest::AnimTrigger { id, trigger });
    }

    fn set_pose(&mut self, id: CombatantId, pose: Pose, held: bool) {
        self.requests
            .push(PresentationRequest::Pose { id, pose, held });
    }

    fn set_speed(&mut self, id: CombatantId, speed: f32) {
        self.requests.push(PresentationRequest::Speed { id, speed });
    }
}

impl Audio for PresentationLog {
    fn play(&mut self, source: Option<CombatantId>, cue: SoundCue) {
        self.requests.push(PresentationRequest::Sound { source, cue });
    }
}

impl Hud for PresentationLog {
    fn show_timer(&mut self, seconds: f32) {
        self.requests.push(PresentationRequest::Timer { seconds });
    }

    fn show_notice(&mut self, text: &str) {
        self.requests.push(PresentationRequest::Notice {
            text: text.to_owned(),
        });
    }

    fn show_health(&mut self, id: CombatantId, fraction: f32) {
        self.requests
            .push(PresentationRequest::Health { id, fraction });
    }

    fn show_menu(&mut self, menu: MenuKind, visible: bool) {
        self.requests
            .push(PresentationRequest::Menu { menu, visible });
    }
}

/// Presentation collaborator that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl Animator for NullPresentation {
    fn trigger(&mut self, _id: CombatantId, _trigger: AnimTrigger) {}

    fn set_pose(&mut self, _id: CombatantId, _pose: Pose, _held: bool) {}

    fn set_speed(&mut self, _id: CombatantId, _speed: f32) {}
}

impl Audio for NullPresentation {
    fn play(&mut self, _source: Option<CombatantId>, _cue: SoundCue) {}
}

impl Hud for NullPresentation {
    fn show_timer(&mut self, _seconds: f32) {}

    fn show_notice(&mut self, _text: &str) {}

    fn show_health(&mut self, _id: CombatantId, _fraction: f32) {}

    fn show_menu(&mut self, _menu: MenuKind, _visible: bool) {}
}
