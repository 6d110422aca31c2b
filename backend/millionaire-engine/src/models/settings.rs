use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::prize::{DEFAULT_PRIZES, DEFAULT_SAFE_ZONES};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Timer and lifeline allowance attached to a difficulty.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyPreset {
    pub id: Difficulty,
    pub name: &'static str,
    pub timer: u32,
    pub lifelines: usize,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn preset(&self) -> DifficultyPreset {
        let (name, timer, lifelines) = match self {
            Difficulty::Easy => ("Mudah", 45, 3),
            Difficulty::Medium => ("Sedang", 30, 3),
            Difficulty::Hard => ("Sulit", 20, 2),
            Difficulty::Expert => ("Expert", 15, 1),
        };
        DifficultyPreset {
            id: *self,
            name,
            timer,
            lifelines,
        }
    }

    /// Percent chance that the phoned friend names the right answer.
    pub fn phone_accuracy(&self) -> u32 {
        match self {
            Difficulty::Easy => 80,
            Difficulty::Medium => 60,
            Difficulty::Hard => 40,
            Difficulty::Expert => 30,
        }
    }

    /// Minimum audience share of the correct option.
    pub fn audience_base_accuracy(&self) -> u32 {
        match self {
            Difficulty::Easy => 70,
            Difficulty::Medium => 60,
            Difficulty::Hard => 50,
            Difficulty::Expert => 40,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(format!("Invalid difficulty: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Blue,
    Green,
    Purple,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ThemeInfo {
    pub id: Theme,
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

impl Theme {
    pub fn catalog() -> Vec<ThemeInfo> {
        vec![
            ThemeInfo { id: Theme::Dark, name: "Gelap", primary: "#0c2461", secondary: "#1e3799" },
            ThemeInfo { id: Theme::Light, name: "Terang", primary: "#ffffff", secondary: "#f5f5f5" },
            ThemeInfo { id: Theme::Blue, name: "Biru", primary: "#1a237e", secondary: "#283593" },
            ThemeInfo { id: Theme::Green, name: "Hijau", primary: "#1b5e20", secondary: "#2e7d32" },
            ThemeInfo { id: Theme::Purple, name: "Ungu", primary: "#4a148c", secondary: "#6a1b9a" },
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Id,
    En,
    Es,
    Fr,
    De,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct LanguageInfo {
    pub id: Language,
    pub name: &'static str,
}

impl Language {
    pub fn catalog() -> Vec<LanguageInfo> {
        vec![
            LanguageInfo { id: Language::Id, name: "Bahasa Indonesia" },
            LanguageInfo { id: Language::En, name: "English" },
            LanguageInfo { id: Language::Es, name: "Español" },
            LanguageInfo { id: Language::Fr, name: "Français" },
            LanguageInfo { id: Language::De, name: "Deutsch" },
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    #[serde(rename = "xlarge")]
    XLarge,
}

impl FontSize {
    pub fn css_value(&self) -> &'static str {
        match self {
            FontSize::Small => "14px",
            FontSize::Medium => "16px",
            FontSize::Large => "18px",
            FontSize::XLarge => "20px",
        }
    }
}

/// User-facing settings persisted under the `config` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    #[validate(range(min = 5, max = 300, message = "Timer must be between 5 and 300 seconds"))]
    pub timer_duration: u32,
    pub enable_sounds: bool,
    pub enable_animations: bool,
    pub lifelines_enabled: bool,
    pub difficulty: Difficulty,
    pub language: Language,
    pub theme: Theme,
    pub font_size: FontSize,
    pub vibration: bool,
    #[validate(range(max = 100, message = "Music volume must be between 0 and 100"))]
    pub music_volume: u8,
    #[validate(range(max = 100, message = "Sound volume must be between 0 and 100"))]
    pub sound_volume: u8,
    pub auto_save: bool,
    pub show_hints: bool,
    pub safe_zone_enabled: bool,
    #[validate(length(min = 1, message = "At least one prize level is required"))]
    pub prize_levels: Vec<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            timer_duration: 30,
            enable_sounds: true,
            enable_animations: true,
            lifelines_enabled: true,
            difficulty: Difficulty::Medium,
            language: Language::Id,
            theme: Theme::Dark,
            font_size: FontSize::Medium,
            vibration: true,
            music_volume: 70,
            sound_volume: 80,
            auto_save: true,
            show_hints: true,
            safe_zone_enabled: true,
            prize_levels: DEFAULT_PRIZES.to_vec(),
        }
    }
}

/// Rules a session runs under, derived from [`GameSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRules {
    pub difficulty: Difficulty,
    pub timer_per_question: u32,
    pub lifelines_count: usize,
    pub safe_zones: Vec<u32>,
    pub walk_away_enabled: bool,
    /// Seconds the phoned friend stays on the line.
    pub phone_friend_duration: u32,
    pub fifty_fifty_enabled: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules::from_settings(&GameSettings::default())
    }
}

impl GameRules {
    pub fn from_settings(settings: &GameSettings) -> Self {
        let preset = settings.difficulty.preset();
        Self {
            difficulty: settings.difficulty,
            timer_per_question: settings.timer_duration,
            lifelines_count: if settings.lifelines_enabled {
                preset.lifelines
            } else {
                0
            },
            safe_zones: if settings.safe_zone_enabled {
                DEFAULT_SAFE_ZONES.to_vec()
            } else {
                Vec::new()
            },
            walk_away_enabled: true,
            phone_friend_duration: 30,
            fifty_fifty_enabled: true,
        }
    }
}
