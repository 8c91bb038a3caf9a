pub mod bank;
pub mod collector;
pub mod composer;
pub mod scorer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use bank::{BankError, QuestionBank, BLANK_MARKER};
pub use collector::{AnswerCollector, CollectError, Progress, WordBank};
pub use composer::{compose_quiz, ComposedQuiz, Shortfall, QUESTIONS_PER_KIND};
pub use scorer::{review, score, PlacementResult, ReviewRow, QUIZ_LENGTH};

pub type QuestionId = u32;

/// Answers keyed by question id: the chosen option text, or the assembled
/// sentence joined by single spaces.
pub type UserAnswers = BTreeMap<QuestionId, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuizQuestion {
    #[serde(rename_all = "camelCase")]
    FillInTheBlank {
        id: QuestionId,
        question_text: String,
        options: Vec<AnswerOption>,
        difficulty: Difficulty,
    },
    #[serde(rename_all = "camelCase")]
    SentenceReorder {
        id: QuestionId,
        sentence_parts: Vec<String>,
        correct_order: String,
        difficulty: Difficulty,
        hint: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    FillInTheBlank,
    SentenceReorder,
}

impl QuizQuestion {
    pub fn id(&self) -> QuestionId {
        match self {
            QuizQuestion::FillInTheBlank { id, .. } | QuizQuestion::SentenceReorder { id, .. } => {
                *id
            }
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            QuizQuestion::FillInTheBlank { .. } => QuestionKind::FillInTheBlank,
            QuizQuestion::SentenceReorder { .. } => QuestionKind::SentenceReorder,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            QuizQuestion::FillInTheBlank { difficulty, .. }
            | QuizQuestion::SentenceReorder { difficulty, .. } => *difficulty,
        }
    }

    /// Text of the answer that scores as correct.
    pub fn expected_answer(&self) -> Option<&str> {
        match self {
            QuizQuestion::FillInTheBlank { options, .. } => options
                .iter()
                .find(|o| o.is_correct)
                .map(|o| o.text.as_str()),
            QuizQuestion::SentenceReorder { correct_order, .. } => Some(correct_order.as_str()),
        }
    }

    /// One-line prompt for lists and the results review.
    pub fn prompt(&self) -> String {
        match self {
            QuizQuestion::FillInTheBlank { question_text, .. } => question_text.clone(),
            QuizQuestion::SentenceReorder { sentence_parts, .. } => {
                format!("Reorder: {}", sentence_parts.join(" / "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Beginner,
    Intermediate,
    Advanced,
}

impl Recommendation {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            Recommendation::Advanced
        } else if percentage >= 50 {
            Recommendation::Intermediate
        } else {
            Recommendation::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Beginner => "Beginner (A1)",
            Recommendation::Intermediate => "Intermediate (A2/B1)",
            Recommendation::Advanced => "Advanced (B2/C1)",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        [
            Recommendation::Beginner,
            Recommendation::Intermediate,
            Recommendation::Advanced,
        ]
        .into_iter()
        .find(|r| r.label() == label)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
