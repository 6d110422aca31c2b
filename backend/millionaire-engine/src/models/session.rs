use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lifeline::Lifelines;
use super::question::Question;
use super::settings::Difficulty;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    WrongAnswer,
    TimedOut,
    Quit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", content = "reason", rename_all = "snake_case")]
pub enum GamePhase {
    Idle,
    Active,
    Won,
    GameOver(EndReason),
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_id: u64,
    /// `None` when the question timed out.
    pub selected_index: Option<usize>,
    pub was_correct: bool,
    pub level: u32,
    pub timestamp: DateTime<Utc>,
}

/// Authoritative state of one playthrough. Only the engine mutates it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: Uuid,
    pub current_level: u32,
    pub score: u64,
    pub guaranteed_prize: u64,
    pub lifelines: Lifelines,
    pub timer_duration: u32,
    pub timer_remaining: u32,
    pub current_question: Option<Question>,
    pub phase: GamePhase,
    pub answered_log: Vec<AnsweredQuestion>,
    pub difficulty: Difficulty,
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(timer_duration: u32, lifeline_allowance: usize, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            current_level: 1,
            score: 0,
            guaranteed_prize: 0,
            lifelines: Lifelines::new(lifeline_allowance),
            timer_duration,
            timer_remaining: timer_duration,
            current_question: None,
            phase: GamePhase::Idle,
            answered_log: Vec::new(),
            difficulty,
            started_at: Utc::now(),
        }
    }

    /// A question is on screen and waiting for an answer or a timeout.
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active && self.current_question.is_some()
    }

    pub fn correct_count(&self) -> usize {
        self.answered_log.iter().filter(|a| a.was_correct).count()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Won,
    WrongAnswer,
    TimedOut,
    Quit,
}

impl GameOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOutcome::Won => "won",
            GameOutcome::WrongAnswer => "wrong_answer",
            GameOutcome::TimedOut => "timed_out",
            GameOutcome::Quit => "quit",
        }
    }
}

impl From<EndReason> for GameOutcome {
    fn from(reason: EndReason) -> Self {
        match reason {
            EndReason::WrongAnswer => GameOutcome::WrongAnswer,
            EndReason::TimedOut => GameOutcome::TimedOut,
            EndReason::Quit => GameOutcome::Quit,
        }
    }
}

/// Final numbers of a finished session, produced at the terminal transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub session_id: Uuid,
    pub outcome: GameOutcome,
    pub final_prize: u64,
    pub levels_completed: u32,
    pub questions_answered: usize,
    pub correct_answers: usize,
    pub accuracy: f64,
    pub seconds_played: u64,
    pub lifelines_used: usize,
    pub jackpot: bool,
    pub finished_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn from_session(
        session: &GameSession,
        outcome: GameOutcome,
        final_prize: u64,
        levels_completed: u32,
    ) -> Self {
        let finished_at = Utc::now();
        let questions_answered = session.answered_log.len();
        let correct_answers = session.correct_count();
        let accuracy = if questions_answered == 0 {
            0.0
        } else {
            let pct = correct_answers as f64 / questions_answered as f64 * 100.0;
            (pct * 10.0).round() / 10.0
        };

        Self {
            session_id: session.id,
            outcome,
            final_prize,
            levels_completed,
            questions_answered,
            correct_answers,
            accuracy,
            seconds_played: (finished_at - session.started_at).num_seconds().max(0) as u64,
            lifelines_used: session.lifelines.used_count(),
            jackpot: outcome == GameOutcome::Won,
            finished_at,
        }
    }
}

/// What `submit_answer` reports back when the answer was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    Correct {
        level_cleared: u32,
        prize: u64,
        safe_zone_reached: bool,
        next_level: u32,
    },
    Won(GameSummary),
    Wrong {
        correct_index: usize,
        explanation: String,
        summary: GameSummary,
    },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        !matches!(self, AnswerOutcome::Wrong { .. })
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        match self {
            AnswerOutcome::Correct { .. } => None,
            AnswerOutcome::Won(summary) | AnswerOutcome::Wrong { summary, .. } => Some(summary),
        }
    }
}
