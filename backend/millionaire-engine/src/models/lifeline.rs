use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifelineKind {
    #[serde(rename = "5050")]
    FiftyFifty,
    #[serde(rename = "phone")]
    PhoneFriend,
    #[serde(rename = "audience")]
    AskAudience,
}

impl LifelineKind {
    pub const ALL: [LifelineKind; 3] = [
        LifelineKind::FiftyFifty,
        LifelineKind::PhoneFriend,
        LifelineKind::AskAudience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifelineKind::FiftyFifty => "5050",
            LifelineKind::PhoneFriend => "phone",
            LifelineKind::AskAudience => "audience",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LifelineKind::FiftyFifty => "50:50",
            LifelineKind::PhoneFriend => "Telepon Teman",
            LifelineKind::AskAudience => "Tanya Penonton",
        }
    }
}

impl fmt::Display for LifelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifelineKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "5050" | "50:50" | "fifty_fifty" => Ok(LifelineKind::FiftyFifty),
            "phone" | "phone_friend" => Ok(LifelineKind::PhoneFriend),
            "audience" | "ask_audience" => Ok(LifelineKind::AskAudience),
            _ => Err(format!("Invalid lifeline: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LifelineState {
    pub used: bool,
}

/// Per-session lifeline bookkeeping.
///
/// `allowance` caps how many distinct lifelines a session may spend; it comes
/// from the difficulty preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lifelines {
    states: BTreeMap<LifelineKind, LifelineState>,
    allowance: usize,
}

impl Lifelines {
    pub fn new(allowance: usize) -> Self {
        Self {
            states: LifelineKind::ALL
                .iter()
                .map(|kind| (*kind, LifelineState::default()))
                .collect(),
            allowance,
        }
    }

    pub fn is_used(&self, kind: LifelineKind) -> bool {
        self.states.get(&kind).map(|s| s.used).unwrap_or(false)
    }

    pub fn used_count(&self) -> usize {
        self.states.values().filter(|s| s.used).count()
    }

    pub fn remaining(&self) -> usize {
        self.allowance.saturating_sub(self.used_count())
    }

    pub fn allowance(&self) -> usize {
        self.allowance
    }

    pub fn is_available(&self, kind: LifelineKind) -> bool {
        !self.is_used(kind) && self.remaining() > 0
    }

    pub fn all_unused(&self) -> bool {
        self.used_count() == 0
    }

    pub(crate) fn mark_used(&mut self, kind: LifelineKind) {
        self.states.entry(kind).or_default().used = true;
    }

    pub fn states(&self) -> impl Iterator<Item = (LifelineKind, LifelineState)> + '_ {
        self.states.iter().map(|(kind, state)| (*kind, *state))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VerySure,
    NotSure,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::VerySure => "sangat yakin",
            Confidence::NotSure => "agak ragu",
        }
    }
}

/// Result handed back to the presentation layer after a lifeline is spent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifelineResult {
    FiftyFifty {
        removed_options: Vec<usize>,
        remaining_options: Vec<usize>,
    },
    PhoneFriend {
        suggestion: usize,
        confidence: Confidence,
        duration_secs: u32,
    },
    AskAudience {
        poll_results: [u32; 4],
        top_choice: usize,
    },
}

impl LifelineResult {
    pub fn kind(&self) -> LifelineKind {
        match self {
            LifelineResult::FiftyFifty { .. } => LifelineKind::FiftyFifty,
            LifelineResult::PhoneFriend { .. } => LifelineKind::PhoneFriend,
            LifelineResult::AskAudience { .. } => LifelineKind::AskAudience,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_original_ids() {
        assert_eq!("5050".parse::<LifelineKind>().unwrap(), LifelineKind::FiftyFifty);
        assert_eq!("phone".parse::<LifelineKind>().unwrap(), LifelineKind::PhoneFriend);
        assert_eq!("audience".parse::<LifelineKind>().unwrap(), LifelineKind::AskAudience);
        assert!("switch".parse::<LifelineKind>().is_err());
    }

    #[test]
    fn allowance_limits_distinct_lifelines() {
        let mut lifelines = Lifelines::new(1);
        assert!(lifelines.all_unused());
        assert!(lifelines.is_available(LifelineKind::PhoneFriend));

        lifelines.mark_used(LifelineKind::FiftyFifty);
        assert_eq!(lifelines.used_count(), 1);
        assert!(!lifelines.is_available(LifelineKind::FiftyFifty));
        assert!(!lifelines.is_available(LifelineKind::PhoneFriend));
    }

    #[test]
    fn serializes_kind_with_original_ids() {
        let json = serde_json::to_string(&LifelineKind::FiftyFifty).unwrap();
        assert_eq!(json, "\"5050\"");
    }
}
