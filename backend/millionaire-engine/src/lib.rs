pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod presentation;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{GameError, GameResult, StoreError};
pub use services::game_engine::GameEngine;
pub use services::AppState;
