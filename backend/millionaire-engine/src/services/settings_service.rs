use serde_json::Value;
use validator::Validate;

use crate::error::{GameError, GameResult};
use crate::models::prize::PrizeTable;
use crate::models::settings::{
    Difficulty, DifficultyPreset, GameRules, GameSettings, Language, LanguageInfo, Theme, ThemeInfo,
};
use crate::services::storage::{save_json, SharedStore, KEY_CONFIG};

/// Reads and writes the `config` document.
pub struct SettingsService {
    store: SharedStore,
}

impl SettingsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored settings merged over defaults; anything unreadable yields defaults.
    pub fn load(&self) -> GameSettings {
        let raw = match self.store.get(KEY_CONFIG) {
            Ok(Some(raw)) => raw,
            Ok(None) => return GameSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read settings, using defaults");
                return GameSettings::default();
            }
        };

        let parsed = serde_json::from_str::<Value>(&raw)
            .map_err(GameError::from)
            .and_then(|stored| merge_field_by_field(&stored));

        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Stored settings are invalid, using defaults");
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> GameResult<()> {
        check_settings(settings)?;
        save_json(self.store.as_ref(), KEY_CONFIG, settings)?;
        tracing::info!("Settings saved (difficulty={})", settings.difficulty.as_str());
        Ok(())
    }

    /// Shallow-merges `patch` (a JSON object) over the current settings.
    pub fn update(&self, patch: Value) -> GameResult<GameSettings> {
        let Value::Object(patch) = patch else {
            return Err(GameError::InvalidSettings(
                "settings patch must be a JSON object".to_string(),
            ));
        };

        let mut current = serde_json::to_value(self.load())?;
        if let Value::Object(fields) = &mut current {
            fields.extend(patch);
        }
        let updated: GameSettings = serde_json::from_value(current)
            .map_err(|e| GameError::InvalidSettings(e.to_string()))?;

        self.save(&updated)?;
        Ok(updated)
    }

    /// Switches difficulty and adopts its preset timer.
    pub fn set_difficulty(&self, difficulty: Difficulty) -> GameResult<GameSettings> {
        let settings = GameSettings {
            difficulty,
            timer_duration: difficulty.preset().timer,
            ..self.load()
        };
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn reset(&self) -> GameResult<GameSettings> {
        self.store.remove(KEY_CONFIG)?;
        tracing::info!("Settings reset to defaults");
        Ok(GameSettings::default())
    }

    pub fn export(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(&self.load())?)
    }

    pub fn import(&self, raw: &str) -> GameResult<GameSettings> {
        let stored: Value = serde_json::from_str(raw)?;
        let settings = merge_over_defaults(&stored)?;
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn rules(&self) -> GameRules {
        GameRules::from_settings(&self.load())
    }

    /// Prize ladder for the current settings, default ladder if the stored
    /// prize list is unusable.
    pub fn prize_table(&self) -> PrizeTable {
        let settings = self.load();
        let rules = GameRules::from_settings(&settings);
        PrizeTable::new(settings.prize_levels.clone(), rules.safe_zones.clone()).unwrap_or_else(
            |e| {
                tracing::warn!(error = %e, "Configured prize ladder rejected, using default");
                match PrizeTable::new(PrizeTable::default().prizes().to_vec(), rules.safe_zones) {
                    Ok(table) => table,
                    Err(_) => PrizeTable::default(),
                }
            },
        )
    }

    pub fn difficulty_levels() -> Vec<DifficultyPreset> {
        Difficulty::ALL.iter().map(Difficulty::preset).collect()
    }

    pub fn available_themes() -> Vec<ThemeInfo> {
        Theme::catalog()
    }

    pub fn available_languages() -> Vec<LanguageInfo> {
        Language::catalog()
    }
}

/// Ladder and safe zones must fit together, the way `prize_table` builds them.
fn check_settings(settings: &GameSettings) -> GameResult<()> {
    settings
        .validate()
        .map_err(|e| GameError::InvalidSettings(e.to_string()))?;
    let rules = GameRules::from_settings(settings);
    PrizeTable::new(settings.prize_levels.clone(), rules.safe_zones)?;
    Ok(())
}

/// Strict merge: any bad field rejects the whole document.
fn merge_over_defaults(stored: &Value) -> GameResult<GameSettings> {
    let Value::Object(stored) = stored else {
        return Err(GameError::InvalidSettings(
            "settings document must be a JSON object".to_string(),
        ));
    };
    let mut merged = serde_json::to_value(GameSettings::default())?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(stored.clone());
    }
    let settings: GameSettings = serde_json::from_value(merged)?;
    check_settings(&settings)?;
    Ok(settings)
}

/// Lenient merge for reading back the stored document. A field that doesn't
/// parse or validate keeps its default; the rest are still applied. Fields are
/// retried until a pass accepts nothing, since some only fit together.
fn merge_field_by_field(stored: &Value) -> GameResult<GameSettings> {
    if let Ok(settings) = merge_over_defaults(stored) {
        return Ok(settings);
    }
    let Value::Object(stored) = stored else {
        return Err(GameError::InvalidSettings(
            "settings document must be a JSON object".to_string(),
        ));
    };

    let mut settings = GameSettings::default();
    let mut pending: Vec<(&String, &Value)> = stored.iter().collect();
    loop {
        let before = pending.len();
        let mut rejected = Vec::new();
        for (key, value) in pending {
            match with_field(&settings, key, value) {
                Ok(next) => settings = next,
                Err(e) => rejected.push((key, value, e)),
            }
        }
        if rejected.is_empty() || rejected.len() == before {
            for (key, _, e) in &rejected {
                tracing::warn!(field = %key, error = %e, "Ignoring stored setting");
            }
            return Ok(settings);
        }
        pending = rejected.into_iter().map(|(key, value, _)| (key, value)).collect();
    }
}

fn with_field(settings: &GameSettings, key: &str, value: &Value) -> GameResult<GameSettings> {
    let mut candidate = serde_json::to_value(settings)?;
    if let Value::Object(fields) = &mut candidate {
        fields.insert(key.to_string(), value.clone());
    }
    let next: GameSettings = serde_json::from_value(candidate)?;
    check_settings(&next)?;
    Ok(next)
}
