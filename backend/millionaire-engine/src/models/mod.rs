pub mod history;
pub mod lifeline;
pub mod prize;
pub mod question;
pub mod session;
pub mod settings;
pub mod timer;

pub use history::{GameStatistics, HistoryEntry};
pub use lifeline::{Confidence, LifelineKind, LifelineResult, LifelineState, Lifelines};
pub use prize::PrizeTable;
pub use question::{Question, OPTION_COUNT};
pub use session::{
    AnswerOutcome, AnsweredQuestion, EndReason, GameOutcome, GamePhase, GameSession, GameSummary,
};
pub use settings::{Difficulty, GameRules, GameSettings};
pub use timer::{TimeExpired, TimerEvent, TimerTick};
