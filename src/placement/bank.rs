use super::{QuestionId, QuizQuestion};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Marks the gap in a fill-in-the-blank sentence.
pub const BLANK_MARKER: &str = "___";

const BUILTIN_BANK: &str = include_str!("../../data/placement_questions.json");

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse question bank: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("Question {id} has {found} options, expected 4")]
    OptionCount { id: QuestionId, found: usize },

    #[error("Question {id} has {found} correct options, expected exactly one")]
    CorrectOptionCount { id: QuestionId, found: usize },

    #[error("Question {0} has no blank marker")]
    MissingBlank(QuestionId),

    #[error("Question {0} has no sentence parts")]
    EmptyParts(QuestionId),

    #[error("Question {0}: sentence parts do not rearrange into the correct order")]
    PartsMismatch(QuestionId),
}

/// Immutable placement question pool, loaded once and passed by reference.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_BANK)
    }

    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, BankError> {
        let questions: Vec<QuizQuestion> = serde_json::from_str(content)?;
        Self::new(questions)
    }

    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, BankError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
            check_question(question)?;
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn fill_in_the_blank(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions
            .iter()
            .filter(|q| matches!(q, QuizQuestion::FillInTheBlank { .. }))
    }

    pub fn sentence_reorder(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions
            .iter()
            .filter(|q| matches!(q, QuizQuestion::SentenceReorder { .. }))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn check_question(question: &QuizQuestion) -> Result<(), BankError> {
    match question {
        QuizQuestion::FillInTheBlank {
            id,
            question_text,
            options,
            ..
        } => {
            if options.len() != 4 {
                return Err(BankError::OptionCount {
                    id: *id,
                    found: options.len(),
                });
            }
            let correct = options.iter().filter(|o| o.is_correct).count();
            if correct != 1 {
                return Err(BankError::CorrectOptionCount {
                    id: *id,
                    found: correct,
                });
            }
            if !question_text.contains(BLANK_MARKER) {
                return Err(BankError::MissingBlank(*id));
            }
        }
        QuizQuestion::SentenceReorder {
            id,
            sentence_parts,
            correct_order,
            ..
        } => {
            if sentence_parts.is_empty() {
                return Err(BankError::EmptyParts(*id));
            }
            let mut parts: Vec<&str> = sentence_parts
                .iter()
                .flat_map(|p| p.split_whitespace())
                .collect();
            let mut expected: Vec<&str> = correct_order.split_whitespace().collect();
            parts.sort_unstable();
            expected.sort_unstable();
            if parts != expected {
                return Err(BankError::PartsMismatch(*id));
            }
        }
    }
    Ok(())
}
