use super::client::{ApiClient, ApiError};
use super::types::{
    Grammar, LessonContent, LessonExercises, Page, SignInRequest, SignUpRequest, UserProfile,
    Vocabulary,
};
use async_trait::async_trait;

/// The calls the interactive client makes; the worker is written against
/// this so it can run on a mock.
#[async_trait]
pub trait LessonBackend: Send + Sync {
    async fn sign_in(&self, request: &SignInRequest) -> Result<UserProfile, ApiError>;
    async fn sign_up(&self, request: &SignUpRequest) -> Result<UserProfile, ApiError>;
    async fn vocabulary(
        &self,
        lesson_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Vocabulary>, ApiError>;
    async fn grammar(&self, lesson_id: u64) -> Result<Vec<Grammar>, ApiError>;
    async fn exercises(&self, lesson_id: u64) -> Result<LessonExercises, ApiError>;
}

#[async_trait]
impl LessonBackend for ApiClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<UserProfile, ApiError> {
        ApiClient::sign_in(self, request).await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<UserProfile, ApiError> {
        ApiClient::sign_up(self, request).await
    }

    async fn vocabulary(
        &self,
        lesson_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Vocabulary>, ApiError> {
        ApiClient::vocabulary(self, lesson_id, page, size).await
    }

    async fn grammar(&self, lesson_id: u64) -> Result<Vec<Grammar>, ApiError> {
        ApiClient::grammar(self, lesson_id).await
    }

    async fn exercises(&self, lesson_id: u64) -> Result<LessonExercises, ApiError> {
        ApiClient::exercises(self, lesson_id).await
    }
}

/// Fetches the three lesson resources concurrently; any failure fails the load.
pub async fn load_lesson<B: LessonBackend + ?Sized>(
    backend: &B,
    lesson_id: u64,
    page_size: u32,
) -> Result<LessonContent, ApiError> {
    let (vocabulary, grammar, exercises) = futures::try_join!(
        backend.vocabulary(lesson_id, 0, page_size),
        backend.grammar(lesson_id),
        backend.exercises(lesson_id),
    )?;

    Ok(LessonContent {
        lesson_id,
        vocabulary,
        grammar,
        exercises,
    })
}

/// Canned backend for tests.
#[cfg(test)]
pub struct MockBackend {
    pub user: Option<UserProfile>,
    pub vocabulary: Vec<Vocabulary>,
    pub grammar: Vec<Grammar>,
    pub exercises: LessonExercises,
    pub fail_grammar: bool,
}

#[cfg(test)]
impl MockBackend {
    pub fn new() -> Self {
        Self {
            user: Some(UserProfile {
                user_id: 1,
                email: "ana@example.com".to_string(),
                full_name: "Ana Silva".to_string(),
                role: super::types::Role::Student,
            }),
            vocabulary: vec![Vocabulary {
                vocab_id: 1,
                word: "apple".to_string(),
                meaning: "a round fruit".to_string(),
                word_type: "noun".to_string(),
                example: "I eat an apple.".to_string(),
                image: None,
            }],
            grammar: vec![Grammar {
                grammar_id: 1,
                grammar_title: "Present simple".to_string(),
                grammar_content: "Habits and facts".to_string(),
                grammar_usage: "Subject + base verb".to_string(),
                grammar_example: "She walks to work.".to_string(),
            }],
            exercises: LessonExercises {
                list_multiple_choice: vec![super::types::MultipleChoiceExercise {
                    id: 1,
                    question: "Which word is a noun?".to_string(),
                    options: vec!["run".to_string(), "apple".to_string()],
                    correct_answer: "apple".to_string(),
                }],
                list_sentence_rewriting: vec![super::types::SentenceRewritingExercise {
                    id: 2,
                    original_sentence: "Somebody stole my bike.".to_string(),
                    rewritten_sentence: "My bike was stolen.".to_string(),
                    hint: Some("Use the passive".to_string()),
                }],
            },
            fail_grammar: false,
        }
    }

    fn status(message: &str) -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl LessonBackend for MockBackend {
    async fn sign_in(&self, request: &SignInRequest) -> Result<UserProfile, ApiError> {
        match &self.user {
            Some(user) if user.email == request.email && request.password == "secret1" => {
                Ok(user.clone())
            }
            _ => Err(Self::status("Invalid email or password")),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            user_id: 2,
            email: request.email.clone(),
            full_name: request.full_name.clone(),
            role: super::types::Role::Student,
        })
    }

    async fn vocabulary(
        &self,
        _lesson_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Vocabulary>, ApiError> {
        Ok(Page {
            content: self.vocabulary.clone(),
            total_pages: 2,
            total_elements: 2 * self.vocabulary.len() as u64,
            number: page,
            size,
        })
    }

    async fn grammar(&self, _lesson_id: u64) -> Result<Vec<Grammar>, ApiError> {
        if self.fail_grammar {
            Err(Self::status("Lesson not found"))
        } else {
            Ok(self.grammar.clone())
        }
    }

    async fn exercises(&self, _lesson_id: u64) -> Result<LessonExercises, ApiError> {
        Ok(self.exercises.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_lesson_combines_resources() {
        let backend = MockBackend::new();
        let lesson = load_lesson(&backend, 5, 10).await.unwrap();
        assert_eq!(lesson.lesson_id, 5);
        assert_eq!(lesson.vocabulary.content.len(), 1);
        assert_eq!(lesson.vocabulary.size, 10);
        assert_eq!(lesson.grammar[0].grammar_title, "Present simple");
        assert_eq!(lesson.exercises.len(), 2);
    }

    #[tokio::test]
    async fn test_load_lesson_fails_as_a_whole() {
        let mut backend = MockBackend::new();
        backend.fail_grammar = true;
        let result = load_lesson(&backend, 5, 10).await;
        assert!(matches!(result, Err(ApiError::Status { .. })));
    }
}
