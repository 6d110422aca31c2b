use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::GameSummary;

/// One finished game as kept under the `history` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    #[serde(alias = "score")]
    pub final_score: u64,
    #[serde(alias = "levels")]
    pub levels_completed: u32,
    #[serde(alias = "questions")]
    pub questions_answered: usize,
    #[serde(alias = "correct")]
    pub correct_count: usize,
    #[serde(alias = "time", default)]
    pub seconds_played: u64,
    #[serde(alias = "lifelines", default)]
    pub lifelines_used_count: usize,
    #[serde(alias = "jackpot", default)]
    pub was_jackpot: bool,
}

impl From<&GameSummary> for HistoryEntry {
    fn from(summary: &GameSummary) -> Self {
        Self {
            date: summary.finished_at,
            final_score: summary.final_prize,
            levels_completed: summary.levels_completed,
            questions_answered: summary.questions_answered,
            correct_count: summary.correct_answers,
            seconds_played: summary.seconds_played,
            lifelines_used_count: summary.lifelines_used,
            was_jackpot: summary.jackpot,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameStatistics {
    pub total_games: usize,
    pub total_winnings: u64,
    pub highest_score: u64,
    pub average_score: u64,
    pub jackpot_count: usize,
    pub best_streak: u32,
    pub last_played_date: Option<DateTime<Utc>>,
}

impl GameStatistics {
    /// Aggregates a most-recent-first log.
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total_winnings: u64 = entries.iter().map(|e| e.final_score).sum();
        let count = entries.len() as u64;

        Self {
            total_games: entries.len(),
            total_winnings,
            highest_score: entries.iter().map(|e| e.final_score).max().unwrap_or(0),
            // round half up, like Math.round on non-negative values
            average_score: (total_winnings + count / 2) / count,
            jackpot_count: entries.iter().filter(|e| e.was_jackpot).count(),
            best_streak: entries.iter().map(|e| e.levels_completed).max().unwrap_or(0),
            last_played_date: entries.first().map(|e| e.date),
        }
    }
}
