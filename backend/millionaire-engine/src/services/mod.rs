use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::metrics::track_store_operation;

pub mod game_engine;
pub mod history_service;
pub mod lifeline_service;
pub mod question_repository;
pub mod question_seed;
pub mod settings_service;
pub mod storage;
pub mod timer_driver;

use game_engine::GameEngine;
use history_service::HistoryRecorder;
use question_repository::QuestionRepository;
use settings_service::SettingsService;
use storage::{FileStore, SharedStore};
use timer_driver::SharedEngine;

/// Everything a front-end needs, wired over one store.
pub struct AppState {
    pub config: Config,
    pub store: SharedStore,
    pub questions: Arc<QuestionRepository>,
    pub history: Arc<HistoryRecorder>,
    pub settings: SettingsService,
    pub engine: SharedEngine,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.data_dir).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir.display())
        })?;
        tracing::info!("Using data directory {}", store.dir().display());

        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Config, store: SharedStore) -> anyhow::Result<Self> {
        let questions = Arc::new(QuestionRepository::new(store.clone()));
        seed_questions(&questions, &config)?;

        let history = Arc::new(HistoryRecorder::new(store.clone()));
        let settings = SettingsService::new(store.clone());

        let engine = GameEngine::new(questions.clone(), settings.prize_table(), settings.rules())
            .with_history(history.clone());

        Ok(Self {
            config,
            store,
            questions,
            history,
            settings,
            engine: Arc::new(Mutex::new(engine)),
        })
    }

    /// Pushes the current settings into the engine for the next game.
    pub async fn refresh_rules(&self) {
        let rules = self.settings.rules();
        let prizes = self.settings.prize_table();
        self.engine.lock().await.configure(rules, prizes);
    }
}

fn seed_questions(questions: &QuestionRepository, config: &Config) -> anyhow::Result<()> {
    if let Some(path) = &config.question_seed_file {
        if questions.all_questions().is_empty() {
            let seed = question_seed::load_seed_file(path)?;
            track_store_operation("import", questions.import_all(seed))
                .context("Failed to import question seed file")?;
            return Ok(());
        }
    }

    track_store_operation("seed", questions.ensure_seeded())
        .context("Failed to seed question bank")?;
    Ok(())
}
