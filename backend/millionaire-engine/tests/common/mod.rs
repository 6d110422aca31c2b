#![allow(dead_code)]

use millionaire_engine::models::{AnswerOutcome, Question};
use millionaire_engine::services::storage::{MemoryStore, SharedStore};
use millionaire_engine::{AppState, Config, GameEngine};

/// App state over an in-memory store seeded with the built-in questions.
pub fn create_test_state() -> AppState {
    init_tracing();
    create_test_state_with(MemoryStore::shared())
}

pub fn create_test_state_with(store: SharedStore) -> AppState {
    let config = Config {
        tick_interval_ms: 20,
        reveal_delay_ms: 0,
        ..Config::default()
    };
    AppState::with_store(config, store).expect("Failed to initialize test app state")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn current_question(engine: &GameEngine) -> Question {
    engine
        .session()
        .current_question
        .clone()
        .expect("no question on screen")
}

pub fn answer_correctly(engine: &mut GameEngine) -> AnswerOutcome {
    let correct = current_question(engine).correct_index;
    engine
        .submit_answer(Some(correct))
        .expect("answer failed")
        .expect("answer ignored")
}

pub fn answer_wrong(engine: &mut GameEngine) -> AnswerOutcome {
    let wrong = current_question(engine).incorrect_indices()[0];
    engine
        .submit_answer(Some(wrong))
        .expect("answer failed")
        .expect("answer ignored")
}

pub fn temp_data_dir() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("millionaire-test-{}", uuid::Uuid::new_v4()))
}
