//! Scripted bout loader.
//!
//! A scenario is a list of timed steps, each one collaborator notification the
//! driver feeds into the session at a simulated time:
//!
//! ```toml
//! [scenario]
//! name = "opening"
//! dt = 0.016666668
//! duration = 40.0
//!
//! [[step]]
//! at = 3.5
//! action = "touch"
//! combatant = 0
//! other = 1
//!
//! [[step]]
//! at = 3.6
//! action = "attack"
//! combatant = 0
//! repeat = 10
//! every = 0.6
//! ```

use std::path::Path;

use anyhow::Context;
use arena_core::{CombatantId, InputEvent, MoveInput};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One collaborator notification.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedAction {
    Move { combatant: CombatantId, x: f32, y: f32 },
    Attack { combatant: CombatantId },
    Defend { combatant: CombatantId },
    Release { combatant: CombatantId },
    /// Collision began between `combatant` and `other`.
    Touch { combatant: CombatantId, other: CombatantId },
    /// Collision ended between `combatant` and `other`.
    Separate { combatant: CombatantId, other: CombatantId },
    Pause,
    Restart,
    Quit,
}

impl ScriptedAction {
    /// The input event this step delivers, for input steps.
    pub fn input(&self) -> Option<(CombatantId, InputEvent)> {
        match *self {
            Self::Move { combatant, x, y } => {
                Some((combatant, InputEvent::movement(MoveInput::new(x, y))))
            }
            Self::Attack { combatant } => Some((combatant, InputEvent::AttackPressed)),
            Self::Defend { combatant } => Some((combatant, InputEvent::DefendPressed)),
            Self::Release { combatant } => Some((combatant, InputEvent::DefendReleased)),
            Self::Touch { .. }
            | Self::Separate { .. }
            | Self::Pause
            | Self::Restart
            | Self::Quit => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ScriptedStep {
    /// Simulated seconds since the session started.
    pub at: f32,
    #[serde(flatten)]
    pub action: ScriptedAction,
    /// Number of times the step fires.
    #[serde(default = "ScriptedStep::default_repeat")]
    pub repeat: u32,
    /// Seconds between repetitions.
    #[serde(default)]
    pub every: f32,
}

impl ScriptedStep {
    fn default_repeat() -> u32 {
        1
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioHeader {
    pub name: String,
    /// Fixed simulation step in seconds.
    pub dt: f32,
    /// Simulated seconds after which the driver stops.
    pub duration: f32,
}

impl Default for ScenarioHeader {
    fn default() -> Self {
        Self {
            name: "unnamed".to_owned(),
            dt: 1.0 / 60.0,
            duration: 300.0,
        }
    }
}

#[derive(Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    scenario: ScenarioHeader,
    #[serde(rename = "step", default)]
    steps: Vec<ScriptedStep>,
}

/// A scripted bout with its steps expanded and ordered by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub dt: f32,
    pub duration: f32,
    /// `(time, action)` pairs sorted by time; ties keep file order.
    pub timeline: Vec<(f32, ScriptedAction)>,
}

impl Scenario {
    /// Actions due in `(from, to]`.
    pub fn due(&self, from: f32, to: f32) -> impl Iterator<Item = &ScriptedAction> {
        self.timeline
            .iter()
            .filter(move |(at, _)| *at > from && *at <= to)
            .map(|(_, action)| action)
    }
}

/// Loader for scripted bouts from TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let file: ScenarioFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))?;
        let header = file.scenario;

        anyhow::ensure!(header.dt > 0.0, "dt must be positive, got {}", header.dt);
        anyhow::ensure!(
            header.duration > 0.0,
            "duration must be positive, got {}",
            header.duration
        );

        let mut timeline = Vec::new();
        for (index, step) in file.steps.iter().enumerate() {
            anyhow::ensure!(step.at >= 0.0, "step {index} starts before zero: {}", step.at);
            anyhow::ensure!(
                step.repeat <= 1 || step.every > 0.0,
                "step {index} repeats without a positive `every`"
            );
            for n in 0..step.repeat {
                timeline.push((step.at + step.every * n as f32, step.action));
            }
        }
        timeline.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        Ok(Scenario {
            name: header.name,
            dt: header.dt,
            duration: header.duration,
            timeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_expand_in_time_order() {
        let scenario = ScenarioLoader::parse(
            r#"
            [scenario]
            name = "jab"

            [[step]]
            at = 1.0
            action = "attack"
            combatant = 0
            repeat = 3
            every = 0.5

            [[step]]
            at = 1.25
            action = "touch"
            combatant = 1
            other = 0
            "#,
        )
        .unwrap();

        let times: Vec<f32> = scenario.timeline.iter().map(|(at, _)| *at).collect();
        assert_eq!(times, vec![1.0, 1.25, 1.5, 2.0]);
        assert_eq!(
            scenario.timeline[1].1,
            ScriptedAction::Touch {
                combatant: CombatantId(1),
                other: CombatantId(0)
            }
        );
        assert_eq!(scenario.name, "jab");
    }

    #[test]
    fn due_uses_half_open_window() {
        let scenario = ScenarioLoader::parse(
            r#"
            [[step]]
            at = 1.0
            action = "pause"
            "#,
        )
        .unwrap();

        assert_eq!(scenario.due(0.5, 1.0).count(), 1);
        assert_eq!(scenario.due(1.0, 1.5).count(), 0);
    }

    #[test]
    fn input_steps_map_to_input_events() {
        let step = ScriptedAction::Move {
            combatant: CombatantId(0),
            x: 0.0,
            y: -1.0,
        };
        assert_eq!(
            step.input(),
            Some((CombatantId(0), InputEvent::Movement { x: 0.0, y: -1.0 }))
        );
        assert_eq!(ScriptedAction::Quit.input(), None);
    }

    #[test]
    fn repeat_without_interval_is_rejected() {
        let result = ScenarioLoader::parse(
            r#"
            [[step]]
            at = 1.0
            action = "attack"
            combatant = 0
            repeat = 2
            "#,
        );
        assert!(result.is_err());
    }
}
