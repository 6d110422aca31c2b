use thiserror::Error;

/// Failure of the underlying key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    /// Neither the live question bank nor the built-in set has a question for
    /// a level the game needs to reach.
    #[error("No question available for level {0}")]
    NoQuestionForLevel(u32),

    #[error("Invalid question at index {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid prize table: {0}")]
    InvalidPrizeTable(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
