use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::models::Question;
use crate::services::question_seed::default_questions;
use crate::services::storage::{load_json, save_json, SharedStore, KEY_QUESTIONS};
use crate::utils::time::next_time_id;

/// Counts reported by [`QuestionRepository::statistics`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBankStats {
    pub total_questions: usize,
    pub by_level: BTreeMap<u32, usize>,
    pub levels_with_questions: usize,
    pub computed_at: DateTime<Utc>,
}

/// Where the engine gets its questions from.
pub trait QuestionSource: Send + Sync {
    fn random_question_for_level(&self, level: u32) -> Option<Question>;
}

/// Question bank persisted as a single JSON array under the `questions` key.
pub struct QuestionRepository {
    store: SharedStore,
    defaults: Vec<Question>,
}

impl QuestionRepository {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            defaults: default_questions(),
        }
    }

    /// Writes the built-in set when nothing is stored yet.
    pub fn ensure_seeded(&self) -> GameResult<bool> {
        if self.store.get(KEY_QUESTIONS)?.is_some() {
            return Ok(false);
        }
        tracing::info!(
            "Question bank empty, seeding {} default questions",
            self.defaults.len()
        );
        self.persist(&self.defaults)?;
        Ok(true)
    }

    /// Full stored set. Corrupt or missing data reads as empty.
    pub fn all_questions(&self) -> Vec<Question> {
        match load_json::<Vec<Question>>(self.store.as_ref(), KEY_QUESTIONS) {
            Ok(Some(questions)) => questions,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read question bank, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn questions_for_level(&self, level: u32) -> Vec<Question> {
        self.all_questions()
            .into_iter()
            .filter(|q| q.level == level)
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<Question> {
        self.all_questions().into_iter().find(|q| q.id == id)
    }

    /// Upserts by id. Unknown or unset ids get a fresh time-based id.
    pub fn save(&self, mut question: Question) -> GameResult<u64> {
        question
            .check()
            .map_err(|reason| GameError::InvalidQuestion { index: 0, reason })?;

        let mut questions = self.all_questions();
        match questions
            .iter()
            .position(|q| question.id != 0 && q.id == question.id)
        {
            Some(index) => {
                tracing::debug!("Updating question {}", question.id);
                questions[index] = question.clone();
            }
            None => {
                let max_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
                question.id = next_time_id(max_id);
                tracing::debug!("Adding question {} at level {}", question.id, question.level);
                questions.push(question.clone());
            }
        }

        self.persist(&questions)?;
        Ok(question.id)
    }

    pub fn delete(&self, id: u64) -> GameResult<bool> {
        let mut questions = self.all_questions();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Ok(false);
        }
        self.persist(&questions)?;
        tracing::info!("Deleted question {}", id);
        Ok(true)
    }

    pub fn export_all(&self) -> Vec<Question> {
        self.all_questions()
    }

    /// Replaces the bank. Every record is checked before anything is written.
    pub fn import_all(&self, questions: Vec<Question>) -> GameResult<()> {
        for (index, question) in questions.iter().enumerate() {
            question
                .check()
                .map_err(|reason| GameError::InvalidQuestion { index, reason })?;
        }
        self.persist(&questions)?;
        tracing::info!("Imported {} questions", questions.len());
        Ok(())
    }

    pub fn reset_to_default(&self) -> GameResult<()> {
        self.persist(&self.defaults)?;
        tracing::info!("Question bank reset to {} defaults", self.defaults.len());
        Ok(())
    }

    pub fn statistics(&self) -> QuestionBankStats {
        let questions = self.all_questions();
        let mut by_level = BTreeMap::new();
        for question in &questions {
            *by_level.entry(question.level).or_insert(0) += 1;
        }
        QuestionBankStats {
            total_questions: questions.len(),
            levels_with_questions: by_level.len(),
            by_level,
            computed_at: Utc::now(),
        }
    }

    fn persist(&self, questions: &[Question]) -> GameResult<()> {
        save_json(self.store.as_ref(), KEY_QUESTIONS, questions)
    }
}

impl QuestionSource for QuestionRepository {
    fn random_question_for_level(&self, level: u32) -> Option<Question> {
        let candidates: Vec<Question> = self
            .questions_for_level(level)
            .into_iter()
            .filter(|q| q.check().is_ok())
            .collect();
        if let Some(question) = candidates.choose(&mut rand::rng()) {
            return Some(question.clone());
        }

        let fallback = self.defaults.iter().find(|q| q.level == level).cloned();
        if fallback.is_some() {
            tracing::warn!("No stored question for level {}, using built-in default", level);
        }
        fallback
    }
}
