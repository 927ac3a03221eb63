pub mod leaderboard;
pub mod leaderboard_service;
pub mod quiz_service;
pub mod quiz_state;
pub mod sighting_service;

pub use leaderboard::{compute_leaderboard, LeaderboardEntry};
pub use leaderboard_service::{LeaderboardService, LeaderboardState};
pub use quiz_service::QuizController;
pub use quiz_state::{
    reduce, AnsweredQuestion, QuestionStep, QuizEvent, QuizOutcome, QuizState,
    TargetSelectionStep,
};
pub use sighting_service::SightingService;
