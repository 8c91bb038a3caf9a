pub mod api;
pub mod api_worker;
pub mod app;
pub mod authoring;
pub mod cli;
pub mod config;
pub mod db;
pub mod grading;
pub mod logger;
pub mod models;
pub mod placement;
pub mod screens;
pub mod session_context;
pub mod ui;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use app::App;
pub use config::AppConfig;
pub use models::{ApiRequest, ApiResponse, AppState, Route};
pub use placement::{
    compose_quiz, review, score, AnswerCollector, PlacementResult, QuestionBank, QuizQuestion,
    Recommendation, UserAnswers,
};
pub use session_context::{SessionContext, SessionStore};
