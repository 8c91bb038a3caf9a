pub mod auth;
pub mod backend;
pub mod client;
pub mod exercise;
pub mod grammar;
pub mod types;
pub mod vocabulary;

pub use backend::{load_lesson, LessonBackend};
pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL};
pub use types::{
    Grammar, LessonContent, LessonExercises, MultipleChoiceExercise, Page, Role,
    SentenceRewritingExercise, SignInRequest, SignUpRequest, UserProfile, Vocabulary,
};
