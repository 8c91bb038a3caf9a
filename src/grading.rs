use crate::api::{MultipleChoiceExercise, SentenceRewritingExercise};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Trim, collapse whitespace, lowercase and drop trailing `.!?`.
pub fn normalize_answer(answer: &str) -> String {
    let collapsed = WHITESPACE.replace_all(answer.trim(), " ");
    collapsed
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || c.is_whitespace())
        .to_lowercase()
}

pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize_answer(given) == normalize_answer(expected)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct: bool,
    pub expected: String,
}

pub fn grade_multiple_choice(exercise: &MultipleChoiceExercise, chosen: &str) -> Grade {
    Grade {
        correct: answers_match(chosen, &exercise.correct_answer),
        expected: exercise.correct_answer.clone(),
    }
}

pub fn grade_rewriting(exercise: &SentenceRewritingExercise, answer: &str) -> Grade {
    Grade {
        correct: answers_match(answer, &exercise.rewritten_sentence),
        expected: exercise.rewritten_sentence.clone(),
    }
}
