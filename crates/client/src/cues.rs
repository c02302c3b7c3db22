//! Stand-in animation collaborator.
//!
//! There is no animation player in a headless run, so [`CueScheduler`] answers
//! every animation trigger with the completion cues a real clip would emit,
//! after fixed clip lengths.

use arena_core::{AnimTrigger, AnimationCue, CombatantId, Pose, PresentationRequest};

/// Clip timings in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipLengths {
    pub jump: f32,
    /// Time from the attack trigger to the strike frame.
    pub attack_strike: f32,
    pub attack: f32,
    pub hit: f32,
}

impl Default for ClipLengths {
    fn default() -> Self {
        Self {
            jump: 0.6,
            attack_strike: 0.25,
            attack: 0.5,
            hit: 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Pending {
    at: f32,
    id: CombatantId,
    cue: AnimationCue,
}

#[derive(Clone, Debug, Default)]
pub struct CueScheduler {
    clips: ClipLengths,
    pending: Vec<Pending>,
}

impl CueScheduler {
    pub fn new(clips: ClipLengths) -> Self {
        Self {
            clips,
            pending: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Reacts to one presentation request observed at simulated time `now`.
    ///
    /// A new trigger interrupts whatever clip the combatant was playing, and
    /// a full pose reset (round start) drops every pending cue for it.
    pub fn observe(&mut self, now: f32, request: &PresentationRequest) {
        match *request {
            PresentationRequest::AnimTrigger { id, trigger } => {
                self.cancel(id);
                match trigger {
                    AnimTrigger::Jump => self.schedule(now + self.clips.jump, id, AnimationCue::JumpFinished),
                    AnimTrigger::Attack => {
                        self.schedule(now + self.clips.attack_strike, id, AnimationCue::AttackPerformed);
                        self.schedule(now + self.clips.attack, id, AnimationCue::AttackFinished);
                    }
                    AnimTrigger::Hit => self.schedule(now + self.clips.hit, id, AnimationCue::HitFinished),
                }
            }
            PresentationRequest::Pose { id, pose, held: false } if pose == Pose::all() => {
                self.cancel(id);
            }
            _ => {}
        }
    }

    /// Removes and returns every cue due at or before `now`, oldest first.
    pub fn due(&mut self, now: f32) -> Vec<(CombatantId, AnimationCue)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|cue| cue.at <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.at.total_cmp(&b.at));
        due.into_iter().map(|cue| (cue.id, cue.cue)).collect()
    }

    fn schedule(&mut self, at: f32, id: CombatantId, cue: AnimationCue) {
        self.pending.push(Pending { at, id, cue });
    }

    fn cancel(&mut self, id: CombatantId) {
        self.pending.retain(|cue| cue.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CombatantId = CombatantId(0);
    const B: CombatantId = CombatantId(1);

    fn trigger(id: CombatantId, trigger: AnimTrigger) -> PresentationRequest {
        PresentationRequest::AnimTrigger { id, trigger }
    }

    #[test]
    fn attack_emits_strike_then_finish() {
        let mut cues = CueScheduler::default();
        cues.observe(1.0, &trigger(A, AnimTrigger::Attack));

        assert!(cues.due(1.2).is_empty());
        assert_eq!(cues.due(1.25), vec![(A, AnimationCue::AttackPerformed)]);
        assert_eq!(cues.due(2.0), vec![(A, AnimationCue::AttackFinished)]);
        assert!(cues.is_idle());
    }

    #[test]
    fn new_trigger_interrupts_running_clip() {
        let mut cues = CueScheduler::default();
        cues.observe(0.0, &trigger(A, AnimTrigger::Attack));
        cues.observe(0.1, &trigger(A, AnimTrigger::Hit));
        cues.observe(0.1, &trigger(B, AnimTrigger::Jump));

        assert_eq!(
            cues.due(1.0),
            vec![(A, AnimationCue::HitFinished), (B, AnimationCue::JumpFinished)]
        );
    }

    #[test]
    fn round_reset_drops_pending_cues() {
        let mut cues = CueScheduler::default();
        cues.observe(0.0, &trigger(A, AnimTrigger::Jump));
        cues.observe(
            0.1,
            &PresentationRequest::Pose {
                id: A,
                pose: Pose::all(),
                held: false,
            },
        );

        assert!(cues.is_idle());
    }
}
