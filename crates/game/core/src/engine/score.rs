use arrayvec::ArrayVec;

use crate::config::ArenaConfig;
use crate::state::CombatantId;

/// Per-combatant round wins against the match threshold.
///
/// Standings are kept in roster order, which is also the tie-break order for
/// [`ScoreKeeper::match_winner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreKeeper {
    rounds_to_win: u32,
    standings: ArrayVec<(CombatantId, u32), { ArenaConfig::MAX_COMBATANTS }>,
}

impl ScoreKeeper {
    /// A threshold of zero would end the match before any round is fought, so
    /// it is raised to one.
    pub fn new(ids: impl IntoIterator<Item = CombatantId>, rounds_to_win: u32) -> Self {
        Self {
            rounds_to_win: rounds_to_win.max(1),
            standings: ids
                .into_iter()
                .take(ArenaConfig::MAX_COMBATANTS)
                .map(|id| (id, 0))
                .collect(),
        }
    }

    pub fn rounds_to_win(&self) -> u32 {
        self.rounds_to_win
    }

    /// Adds one round win. Returns the new count, or `None` for an id that is
    /// not on the scoreboard.
    pub fn record_round_win(&mut self, id: CombatantId) -> Option<u32> {
        let (_, wins) = self.standings.iter_mut().find(|(entry, _)| *entry == id)?;
        *wins += 1;
        Some(*wins)
    }

    pub fn wins(&self, id: CombatantId) -> u32 {
        self.standings
            .iter()
            .find(|(entry, _)| *entry == id)
            .map_or(0, |(_, wins)| *wins)
    }

    /// First combatant in roster order that reached the threshold.
    pub fn match_winner(&self) -> Option<CombatantId> {
        self.standings
            .iter()
            .find(|(_, wins)| *wins >= self.rounds_to_win)
            .map(|(id, _)| *id)
    }

    pub fn standings(&self) -> &[(CombatantId, u32)] {
        &self.standings
    }

    pub fn reset(&mut self) {
        for (_, wins) in &mut self.standings {
            *wins = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CombatantId = CombatantId(0);
    const B: CombatantId = CombatantId(1);

    #[test]
    fn winner_appears_at_threshold() {
        let mut score = ScoreKeeper::new([A, B], 2);
        assert_eq!(score.record_round_win(B), Some(1));
        assert_eq!(score.match_winner(), None);
        assert_eq!(score.record_round_win(B), Some(2));
        assert_eq!(score.match_winner(), Some(B));
        assert_eq!(score.standings(), &[(A, 0), (B, 2)]);
    }

    #[test]
    fn roster_order_breaks_ties() {
        let mut score = ScoreKeeper::new([A, B], 1);
        score.record_round_win(B);
        score.record_round_win(A);
        assert_eq!(score.match_winner(), Some(A));
    }

    #[test]
    fn unknown_id_is_not_scored() {
        let mut score = ScoreKeeper::new([A, B], 2);
        assert_eq!(score.record_round_win(CombatantId(5)), None);
        assert_eq!(score.wins(CombatantId(5)), 0);
    }

    #[test]
    fn reset_clears_wins_and_zero_threshold_is_raised() {
        let mut score = ScoreKeeper::new([A, B], 0);
        assert_eq!(score.rounds_to_win(), 1);
        assert_eq!(score.match_winner(), None);

        score.record_round_win(A);
        score.reset();
        assert_eq!(score.wins(A), 0);
        assert_eq!(score.match_winner(), None);
    }
}
