use crate::models::{GameStatistics, GameSummary, HistoryEntry};
use crate::services::storage::{load_json, save_json, SharedStore, KEY_HISTORY};

/// Most entries kept; older games fall off the end.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Bounded, most-recent-first log of finished games.
///
/// Store failures never reach the caller: reads degrade to an empty log and
/// failed writes are logged and dropped.
pub struct HistoryRecorder {
    store: SharedStore,
}

impl HistoryRecorder {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn record(&self, summary: &GameSummary) -> HistoryEntry {
        let entry = HistoryEntry::from(summary);

        let mut history = self.history();
        history.insert(0, entry.clone());
        history.truncate(MAX_HISTORY_ENTRIES);

        match save_json(self.store.as_ref(), KEY_HISTORY, &history) {
            Ok(()) => tracing::info!(
                "Game recorded: session={}, prize={}, levels={}",
                summary.session_id,
                entry.final_score,
                entry.levels_completed
            ),
            Err(e) => tracing::error!(error = %e, "Failed to save game history"),
        }

        entry
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        match load_json::<Vec<HistoryEntry>>(self.store.as_ref(), KEY_HISTORY) {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read game history, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn statistics(&self) -> GameStatistics {
        GameStatistics::from_entries(&self.history())
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(KEY_HISTORY) {
            tracing::error!(error = %e, "Failed to clear game history");
        }
    }
}
