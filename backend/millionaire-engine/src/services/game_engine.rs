use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::error::{GameError, GameResult};
use crate::metrics::{
    ANSWERS_SUBMITTED_TOTAL, GAMES_ACTIVE, GAMES_TOTAL, LIFELINES_USED_TOTAL, TIMER_TICKS_TOTAL,
};
use crate::models::{
    AnswerOutcome, AnsweredQuestion, EndReason, GameOutcome, GamePhase, GameRules, GameSession,
    GameSummary, LifelineKind, LifelineResult, PrizeTable, Question, TimeExpired, TimerEvent,
    TimerTick, OPTION_COUNT,
};
use crate::services::history_service::HistoryRecorder;
use crate::services::lifeline_service;
use crate::services::question_repository::QuestionSource;

/// Drives one session at a time through the question ladder.
///
/// The engine is synchronous and has no clock of its own: something outside
/// (see `TimerDriver`) calls [`GameEngine::tick`] once per second. Calls that
/// don't fit the current phase return `None` rather than an error.
pub struct GameEngine {
    questions: Arc<dyn QuestionSource>,
    prizes: PrizeTable,
    rules: GameRules,
    history: Option<Arc<HistoryRecorder>>,
    session: GameSession,
}

impl GameEngine {
    pub fn new(questions: Arc<dyn QuestionSource>, prizes: PrizeTable, rules: GameRules) -> Self {
        let session = GameSession::new(
            rules.timer_per_question,
            rules.lifelines_count,
            rules.difficulty,
        );
        Self {
            questions,
            prizes,
            rules,
            history: None,
            session,
        }
    }

    /// Finished games are written to `recorder`.
    pub fn with_history(mut self, recorder: Arc<HistoryRecorder>) -> Self {
        self.history = Some(recorder);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn prize_table(&self) -> &PrizeTable {
        &self.prizes
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// New rules and prizes take effect from the next `start_game`.
    pub fn configure(&mut self, rules: GameRules, prizes: PrizeTable) {
        self.rules = rules;
        self.prizes = prizes;
    }

    pub fn start_game(&mut self) -> GameResult<&GameSession> {
        if self.session.is_active() {
            tracing::info!(session_id = %self.session.id, "Discarding unfinished session");
            GAMES_ACTIVE.dec();
        }

        self.session = GameSession::new(
            self.rules.timer_per_question,
            self.rules.lifelines_count,
            self.rules.difficulty,
        );
        let question = self.load_question(1)?;
        self.session.current_question = Some(question);
        self.session.phase = GamePhase::Active;
        GAMES_ACTIVE.inc();

        tracing::info!(
            session_id = %self.session.id,
            difficulty = self.rules.difficulty.as_str(),
            "Game started ({}s per question, {} lifelines)",
            self.rules.timer_per_question,
            self.rules.lifelines_count
        );
        Ok(&self.session)
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.session.is_active() {
            return None;
        }
        let Some((question_id, correct_index)) = self
            .session
            .current_question
            .as_ref()
            .map(|q| (q.id, q.correct_index))
        else {
            return None;
        };

        let session = &mut self.session;
        session.timer_remaining = session.timer_remaining.saturating_sub(1);

        if session.timer_remaining > 0 {
            TIMER_TICKS_TOTAL.with_label_values(&["tick"]).inc();
            return Some(TimerEvent::TimerTick(TimerTick {
                session_id: session.id,
                level: session.current_level,
                remaining_seconds: session.timer_remaining,
                elapsed_seconds: session.timer_duration - session.timer_remaining,
                total_seconds: session.timer_duration,
                timestamp: Utc::now(),
            }));
        }

        TIMER_TICKS_TOTAL.with_label_values(&["expired"]).inc();
        session.answered_log.push(AnsweredQuestion {
            question_id,
            selected_index: None,
            was_correct: false,
            level: session.current_level,
            timestamp: Utc::now(),
        });

        tracing::info!(
            session_id = %session.id,
            level = session.current_level,
            "Time ran out"
        );
        let final_prize = session.guaranteed_prize;
        let levels_completed = session.current_level - 1;
        let summary = self.finish(EndReason::TimedOut.into(), final_prize, levels_completed);

        Some(TimerEvent::TimeExpired(TimeExpired {
            session_id: summary.session_id,
            correct_index,
            summary,
            timestamp: Utc::now(),
            message: "Waktu habis!".to_string(),
        }))
    }

    pub fn submit_answer(&mut self, selected: Option<usize>) -> GameResult<Option<AnswerOutcome>> {
        let Some(index) = selected else {
            return Ok(None);
        };
        if !self.session.is_active() || index >= OPTION_COUNT {
            return Ok(None);
        }
        let Some(question) = self.session.current_question.clone() else {
            return Ok(None);
        };

        let level = self.session.current_level;
        let correct = question.is_correct(index);
        self.session.answered_log.push(AnsweredQuestion {
            question_id: question.id,
            selected_index: Some(index),
            was_correct: correct,
            level,
            timestamp: Utc::now(),
        });
        ANSWERS_SUBMITTED_TOTAL
            .with_label_values(&[if correct { "true" } else { "false" }])
            .inc();

        if !correct {
            tracing::info!(
                session_id = %self.session.id,
                level,
                "Wrong answer {} (correct {})",
                index,
                question.correct_index
            );
            let final_prize = self.session.guaranteed_prize;
            let summary = self.finish(GameOutcome::WrongAnswer, final_prize, level - 1);
            return Ok(Some(AnswerOutcome::Wrong {
                correct_index: question.correct_index,
                explanation: question.explanation,
                summary,
            }));
        }

        let prize = self.prizes.prize_for_level(level);
        let safe_zone_reached = self.prizes.is_safe_zone(level);
        self.session.score = prize;
        if safe_zone_reached {
            self.session.guaranteed_prize = prize;
        }
        tracing::info!(
            session_id = %self.session.id,
            level,
            "Correct answer, prize now {}{}",
            prize,
            if safe_zone_reached { " (safe zone)" } else { "" }
        );

        if level >= self.prizes.len() {
            let summary = self.finish(GameOutcome::Won, prize, level);
            return Ok(Some(AnswerOutcome::Won(summary)));
        }

        let next_level = level + 1;
        match self.load_question(next_level) {
            Ok(next) => {
                self.session.current_level = next_level;
                self.session.current_question = Some(next);
                self.session.timer_remaining = self.session.timer_duration;
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.session.id,
                    level = next_level,
                    "Cannot continue session: {}",
                    e
                );
                self.session.phase = GamePhase::Idle;
                self.session.current_question = None;
                GAMES_ACTIVE.dec();
                return Err(e);
            }
        }

        Ok(Some(AnswerOutcome::Correct {
            level_cleared: level,
            prize,
            safe_zone_reached,
            next_level,
        }))
    }

    pub fn use_lifeline(&mut self, kind: LifelineKind) -> Option<LifelineResult> {
        self.use_lifeline_with(kind, &mut rand::rng())
    }

    /// Same as [`GameEngine::use_lifeline`] with a caller-supplied RNG.
    pub fn use_lifeline_with<R: Rng + ?Sized>(
        &mut self,
        kind: LifelineKind,
        rng: &mut R,
    ) -> Option<LifelineResult> {
        if !self.session.is_active() || !self.session.lifelines.is_available(kind) {
            return None;
        }
        if kind == LifelineKind::FiftyFifty && !self.rules.fifty_fifty_enabled {
            return None;
        }
        let question = self.session.current_question.as_ref()?;

        let result = lifeline_service::resolve(
            kind,
            question,
            self.session.difficulty,
            self.rules.phone_friend_duration,
            rng,
        );
        self.session.lifelines.mark_used(kind);
        LIFELINES_USED_TOTAL.with_label_values(&[kind.as_str()]).inc();

        tracing::info!(
            session_id = %self.session.id,
            level = self.session.current_level,
            kind = kind.as_str(),
            "Lifeline used ({} left)",
            self.session.lifelines.remaining()
        );
        Some(result)
    }

    /// Walks away with the guaranteed prize.
    pub fn quit_game(&mut self) -> Option<GameSummary> {
        if !self.session.is_active() || !self.rules.walk_away_enabled {
            return None;
        }
        let final_prize = self.session.guaranteed_prize;
        let levels_completed = self.session.current_level - 1;
        tracing::info!(session_id = %self.session.id, "Player walked away");
        Some(self.finish(GameOutcome::Quit, final_prize, levels_completed))
    }

    fn load_question(&self, level: u32) -> GameResult<Question> {
        self.questions
            .random_question_for_level(level)
            .ok_or(GameError::NoQuestionForLevel(level))
    }

    fn finish(&mut self, outcome: GameOutcome, final_prize: u64, levels_completed: u32) -> GameSummary {
        self.session.phase = match outcome {
            GameOutcome::Won => GamePhase::Won,
            GameOutcome::WrongAnswer => GamePhase::GameOver(EndReason::WrongAnswer),
            GameOutcome::TimedOut => GamePhase::GameOver(EndReason::TimedOut),
            GameOutcome::Quit => GamePhase::GameOver(EndReason::Quit),
        };

        let summary = GameSummary::from_session(&self.session, outcome, final_prize, levels_completed);
        GAMES_TOTAL.with_label_values(&[outcome.as_str()]).inc();
        GAMES_ACTIVE.dec();

        tracing::info!(
            session_id = %summary.session_id,
            outcome = outcome.as_str(),
            "Game finished: prize={}, levels={}, accuracy={}%",
            summary.final_prize,
            summary.levels_completed,
            summary.accuracy
        );

        if let Some(history) = &self.history {
            history.record(&summary);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, GameSettings};
    use crate::services::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// One question per level up to `max_level`, always answered by option A.
    struct Ladder {
        max_level: u32,
    }

    impl QuestionSource for Ladder {
        fn random_question_for_level(&self, level: u32) -> Option<Question> {
            (level <= self.max_level).then(|| Question {
                id: u64::from(level),
                ..Question::new(level, "Q?", ["a", "b", "c", "d"], 0, "A is right")
            })
        }
    }

    fn engine_with(max_level: u32, difficulty: Difficulty) -> GameEngine {
        let settings = GameSettings {
            difficulty,
            timer_duration: difficulty.preset().timer,
            ..GameSettings::default()
        };
        GameEngine::new(
            Arc::new(Ladder { max_level }),
            PrizeTable::default(),
            GameRules::from_settings(&settings),
        )
    }

    fn engine() -> GameEngine {
        engine_with(11, Difficulty::Medium)
    }

    #[test]
    fn start_game_activates_level_one() {
        let mut engine = engine();
        let session = engine.start_game().unwrap();
        assert_eq!(session.phase, GamePhase::Active);
        assert_eq!(session.current_level, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.timer_remaining, 30);
        assert!(session.lifelines.all_unused());
    }

    #[test]
    fn start_game_without_level_one_fails() {
        let mut engine = engine_with(0, Difficulty::Medium);
        assert!(matches!(engine.start_game(), Err(GameError::NoQuestionForLevel(1))));
        assert!(!engine.session().is_active());
    }

    #[test]
    fn tick_without_question_leaves_timer_alone() {
        let mut engine = engine();
        engine.start_game().unwrap();
        for _ in 0..29 {
            engine.tick();
        }
        assert_eq!(engine.session().timer_remaining, 1);

        engine.session.current_question = None;
        assert!(engine.tick().is_none());
        assert_eq!(engine.session().timer_remaining, 1);
        assert!(engine.session().answered_log.is_empty());
    }

    #[test]
    fn idle_engine_ignores_everything() {
        let mut engine = engine();
        assert!(engine.tick().is_none());
        assert!(engine.submit_answer(Some(0)).unwrap().is_none());
        assert!(engine.use_lifeline(LifelineKind::FiftyFifty).is_none());
        assert!(engine.quit_game().is_none());
    }

    #[test]
    fn correct_answer_sets_score_and_advances() {
        let mut engine = engine();
        engine.start_game().unwrap();
        engine.tick();

        let outcome = engine.submit_answer(Some(0)).unwrap().unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Correct {
                level_cleared: 1,
                prize: 500_000,
                safe_zone_reached: false,
                next_level: 2,
            }
        );
        let session = engine.session();
        assert_eq!(session.score, 500_000);
        assert_eq!(session.current_level, 2);
        assert_eq!(session.timer_remaining, 30);
    }

    #[test]
    fn missing_selection_or_bad_index_is_ignored() {
        let mut engine = engine();
        engine.start_game().unwrap();
        assert!(engine.submit_answer(None).unwrap().is_none());
        assert!(engine.submit_answer(Some(4)).unwrap().is_none());
        assert!(engine.session().answered_log.is_empty());
    }

    #[test]
    fn wrong_answer_pays_guaranteed_prize() {
        let mut engine = engine();
        engine.start_game().unwrap();
        for _ in 0..5 {
            engine.submit_answer(Some(0)).unwrap();
        }
        assert_eq!(engine.session().guaranteed_prize, 10_000_000);

        let outcome = engine.submit_answer(Some(2)).unwrap().unwrap();
        let AnswerOutcome::Wrong { correct_index, summary, .. } = outcome else {
            panic!("expected wrong answer");
        };
        assert_eq!(correct_index, 0);
        assert_eq!(summary.final_prize, 10_000_000);
        assert_eq!(summary.levels_completed, 5);
        assert_eq!(summary.outcome, GameOutcome::WrongAnswer);
        assert_eq!(engine.session().phase, GamePhase::GameOver(EndReason::WrongAnswer));
    }

    #[test]
    fn clearing_the_jackpot_wins() {
        let mut engine = engine();
        engine.start_game().unwrap();
        let mut last = None;
        for _ in 0..11 {
            last = engine.submit_answer(Some(0)).unwrap();
        }
        let Some(AnswerOutcome::Won(summary)) = last else {
            panic!("expected a win");
        };
        assert_eq!(summary.final_prize, 1_000_000_000);
        assert_eq!(summary.levels_completed, 11);
        assert!(summary.jackpot);
        assert_eq!(engine.session().phase, GamePhase::Won);
        assert!(engine.submit_answer(Some(0)).unwrap().is_none());
    }

    #[test]
    fn countdown_expires_into_timeout() {
        let mut engine = engine_with(11, Difficulty::Expert);
        engine.start_game().unwrap();
        engine.submit_answer(Some(0)).unwrap();

        let mut ticks = 0;
        let expired = loop {
            match engine.tick() {
                Some(TimerEvent::TimerTick(tick)) => {
                    ticks += 1;
                    assert_eq!(tick.remaining_seconds, 15 - ticks);
                }
                Some(TimerEvent::TimeExpired(expired)) => break expired,
                None => panic!("timer stopped early"),
            }
        };
        assert_eq!(ticks, 14);
        assert_eq!(expired.correct_index, 0);
        assert_eq!(expired.summary.outcome, GameOutcome::TimedOut);
        assert_eq!(expired.summary.final_prize, 0);
        assert_eq!(expired.summary.levels_completed, 1);

        let last = engine.session().answered_log.last().unwrap();
        assert_eq!(last.selected_index, None);
        assert!(!last.was_correct);
        assert!(engine.tick().is_none());
        assert!(engine.submit_answer(Some(0)).unwrap().is_none());
    }

    #[test]
    fn quit_keeps_guaranteed_prize_only() {
        let mut engine = engine();
        engine.start_game().unwrap();
        for _ in 0..6 {
            engine.submit_answer(Some(0)).unwrap();
        }
        assert_eq!(engine.session().score, 25_000_000);

        let summary = engine.quit_game().unwrap();
        assert_eq!(summary.final_prize, 10_000_000);
        assert_eq!(summary.levels_completed, 6);
        assert!(engine.quit_game().is_none());
    }

    #[test]
    fn lifelines_are_single_use_and_capped() {
        let mut engine = engine_with(11, Difficulty::Expert);
        engine.start_game().unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let result = engine.use_lifeline_with(LifelineKind::AskAudience, &mut rng);
        assert!(matches!(result, Some(LifelineResult::AskAudience { .. })));
        assert!(engine.use_lifeline_with(LifelineKind::AskAudience, &mut rng).is_none());
        // expert allows a single lifeline
        assert!(engine.use_lifeline_with(LifelineKind::FiftyFifty, &mut rng).is_none());
        assert_eq!(engine.session().lifelines.used_count(), 1);
    }

    #[test]
    fn missing_next_level_drops_to_idle() {
        let mut engine = engine_with(2, Difficulty::Medium);
        engine.start_game().unwrap();
        engine.submit_answer(Some(0)).unwrap();

        let err = engine.submit_answer(Some(0)).unwrap_err();
        assert!(matches!(err, GameError::NoQuestionForLevel(3)));
        assert_eq!(engine.session().phase, GamePhase::Idle);
        assert_eq!(engine.session().score, 1_000_000);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn terminal_transitions_are_recorded() {
        let store = MemoryStore::shared();
        let recorder = Arc::new(HistoryRecorder::new(store));
        let mut engine = engine().with_history(recorder.clone());

        engine.start_game().unwrap();
        engine.submit_answer(Some(1)).unwrap();
        engine.start_game().unwrap();
        engine.quit_game();

        let history = recorder.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].final_score, 0);
    }

    #[test]
    fn restarting_discards_without_recording() {
        let recorder = Arc::new(HistoryRecorder::new(MemoryStore::shared()));
        let mut engine = engine().with_history(recorder.clone());
        let first = engine.start_game().unwrap().id;
        let second = engine.start_game().unwrap().id;
        assert_ne!(first, second);
        assert!(recorder.history().is_empty());
    }
}
