//! Display leaderboard
//!
//! Inbound, read-only ranking data for the home screen. The simulation never
//! writes to it; the hosting platform supplies the list (or the default
//! roster is shown).

use serde::{Deserialize, Serialize};

/// A single ranked entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEntry {
    pub name: String,
    pub score: u64,
}

/// Ordered name/score pairs, highest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    entries: Vec<RankEntry>,
}

impl Leaderboard {
    /// Build a leaderboard from arbitrary entries, sorting them descending
    pub fn new(mut entries: Vec<RankEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// The default display roster
    pub fn default_roster() -> Self {
        Self::new(
            [
                ("Battle King", 55000),
                ("Crusher", 28400),
                ("Iron Top", 15200),
                ("Rookie", 5200),
            ]
            .into_iter()
            .map(|(name, score)| RankEntry {
                name: name.to_string(),
                score,
            })
            .collect(),
        )
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// 1-indexed rank a score would place at on this board
    pub fn rank_for(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_ordered_descending() {
        let board = Leaderboard::new(vec![
            RankEntry {
                name: "low".into(),
                score: 10,
            },
            RankEntry {
                name: "high".into(),
                score: 1000,
            },
            RankEntry {
                name: "mid".into(),
                score: 500,
            },
        ]);

        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![1000, 500, 10]);
    }

    #[test]
    fn test_default_roster_is_populated_and_ordered() {
        let board = Leaderboard::default_roster();
        assert!(!board.is_empty());
        assert_eq!(board.top_score(), Some(55000));
        assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_for_score() {
        let board = Leaderboard::default_roster();
        assert_eq!(board.rank_for(60000), 1);
        assert_eq!(board.rank_for(20000), 3);
        assert_eq!(board.rank_for(1), 5);
    }
}
