//! Read-only view of a session for observers.

use crate::combat::CombatState;
use crate::engine::{ArenaEngine, MatchPhase, Round};
use crate::env::Pose;
use crate::state::{Combatant, CombatantId, Position};

/// Serializable copy of everything an observer may want to show.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaSnapshot {
    pub phase: MatchPhase,
    pub round: Round,
    pub paused: bool,
    pub quit: bool,
    pub rounds_to_win: u32,
    pub match_winner: Option<CombatantId>,
    pub combatants: Vec<CombatantSnapshot>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub name: String,
    pub state: CombatState,
    pub health: u32,
    pub max_health: u32,
    pub wins: u32,
    pub position: Position,
    pub pose: Pose,
    pub colliding: Option<CombatantId>,
    pub input_enabled: bool,
}

impl ArenaSnapshot {
    pub fn capture(engine: &ArenaEngine) -> Self {
        let score = engine.controller().score();
        Self {
            phase: engine.phase(),
            round: *engine.controller().round(),
            paused: engine.is_paused(),
            quit: engine.is_quit(),
            rounds_to_win: score.rounds_to_win(),
            match_winner: score.match_winner(),
            combatants: engine
                .arena()
                .combatants()
                .iter()
                .map(|combatant| CombatantSnapshot::capture(combatant, score.wins(combatant.id())))
                .collect(),
        }
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantSnapshot> {
        self.combatants.iter().find(|combatant| combatant.id == id)
    }
}

impl CombatantSnapshot {
    fn capture(combatant: &Combatant, wins: u32) -> Self {
        Self {
            id: combatant.id(),
            name: combatant.name().to_owned(),
            state: combatant.state(),
            health: combatant.health(),
            max_health: combatant.max_health(),
            wins,
            position: combatant.position(),
            pose: combatant.pose(),
            colliding: combatant.colliding(),
            input_enabled: combatant.input_enabled(),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::config::{ArenaConfig, CombatantSpec};
    use crate::env::NullPresentation;

    #[test]
    fn snapshot_serializes_to_json() {
        let mut engine = ArenaEngine::new(
            ArenaConfig::default(),
            &[
                CombatantSpec::new("Ayla", Position::new(-2.0, 0.0)),
                CombatantSpec::new("Bram", Position::new(2.0, 0.0)),
            ],
        )
        .unwrap();
        engine.tick(0.1, &mut NullPresentation);

        let snapshot = engine.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["phase"], "starting");
        assert_eq!(json["round"]["number"], 1);
        assert_eq!(json["combatants"][1]["name"], "Bram");
        assert_eq!(json["combatants"][1]["state"], "Default");

        let back: ArenaSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
