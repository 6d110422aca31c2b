use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::GameSummary;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    TimerTick(TimerTick),
    TimeExpired(TimeExpired),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimerTick {
    pub session_id: Uuid,
    pub level: u32,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub total_seconds: u32,
    pub timestamp: DateTime<Utc>,
}

/// Countdown reached zero; the session is already resolved as a loss.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeExpired {
    pub session_id: Uuid,
    pub correct_index: usize,
    pub summary: GameSummary,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// How urgent the remaining time looks on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Hurry,
    Critical,
}

impl TimerTick {
    pub fn urgency(&self) -> Urgency {
        match self.remaining_seconds {
            0..=10 => Urgency::Critical,
            11..=20 => Urgency::Hurry,
            _ => Urgency::Calm,
        }
    }
}

impl TimerEvent {
    pub fn is_expired(&self) -> bool {
        matches!(self, TimerEvent::TimeExpired(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(remaining: u32) -> TimerTick {
        TimerTick {
            session_id: Uuid::new_v4(),
            level: 1,
            remaining_seconds: remaining,
            elapsed_seconds: 30 - remaining,
            total_seconds: 30,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(tick(25).urgency(), Urgency::Calm);
        assert_eq!(tick(20).urgency(), Urgency::Hurry);
        assert_eq!(tick(10).urgency(), Urgency::Critical);
    }

    #[test]
    fn tick_serializes_with_kebab_tag() {
        let event = TimerEvent::TimerTick(tick(29));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"timer-tick\""));
    }
}
