use super::{QuestionBank, QuizQuestion, Recommendation, UserAnswers};

/// Fixed denominator for the percentage, independent of the bank size.
pub const QUIZ_LENGTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub prompt: String,
    pub given: Option<String>,
    pub expected: String,
    pub correct: bool,
}

pub(crate) fn is_correct(question: &QuizQuestion, answer: &str) -> bool {
    // Exact, case-sensitive comparison for both kinds.
    question.expected_answer() == Some(answer)
}

/// Walks the whole bank and looks each answer up by question id.
pub fn score(bank: &QuestionBank, answers: &UserAnswers) -> PlacementResult {
    let correct = bank
        .questions()
        .iter()
        .filter(|q| {
            answers
                .get(&q.id())
                .is_some_and(|answer| is_correct(q, answer))
        })
        .count() as u32;

    let percentage = correct * 100 / QUIZ_LENGTH;

    PlacementResult {
        correct,
        total: QUIZ_LENGTH,
        percentage,
        recommendation: Recommendation::from_percentage(percentage),
    }
}

/// Per-question breakdown of the quiz instance that was shown.
pub fn review(questions: &[QuizQuestion], answers: &UserAnswers) -> Vec<ReviewRow> {
    questions
        .iter()
        .map(|q| {
            let given = answers.get(&q.id()).cloned();
            let correct = given.as_deref().is_some_and(|a| is_correct(q, a));
            ReviewRow {
                prompt: q.prompt(),
                given,
                expected: q.expected_answer().unwrap_or_default().to_string(),
                correct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::compose_quiz;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_correct(questions: &[QuizQuestion]) -> UserAnswers {
        questions
            .iter()
            .map(|q| (q.id(), q.expected_answer().unwrap().to_string()))
            .collect()
    }

    #[test]
    fn test_all_correct_is_advanced() {
        let bank = QuestionBank::builtin().unwrap();
        let quiz = compose_quiz(&bank, &mut StdRng::seed_from_u64(9));
        let answers = all_correct(&quiz.questions);

        let result = score(&bank, &answers);
        assert_eq!(result.correct, 10);
        assert_eq!(result.percentage, 100);
        assert_eq!(result.recommendation, Recommendation::Advanced);
        assert_eq!(result.recommendation.label(), "Advanced (B2/C1)");
    }

    #[test]
    fn test_empty_answers_is_beginner() {
        let bank = QuestionBank::builtin().unwrap();
        let result = score(&bank, &UserAnswers::new());
        assert_eq!(result.correct, 0);
        assert_eq!(result.recommendation, Recommendation::Beginner);
    }

    #[test]
    fn test_single_wrong_answer() {
        let bank = QuestionBank::builtin().unwrap();
        let answers = UserAnswers::from([(1, "am".to_string())]);
        let result = score(&bank, &answers);
        assert_eq!(result.correct, 0);
        assert_eq!(result.recommendation.label(), "Beginner (A1)");
    }

    #[test]
    fn test_question_one_plus_nine_correct() {
        let bank = QuestionBank::builtin().unwrap();
        let mut answers = UserAnswers::from([(1, "is".to_string())]);
        let others: Vec<&QuizQuestion> = bank
            .fill_in_the_blank()
            .filter(|q| q.id() != 1)
            .take(4)
            .chain(bank.sentence_reorder().take(5))
            .collect();
        for q in others {
            answers.insert(q.id(), q.expected_answer().unwrap().to_string());
        }

        let result = score(&bank, &answers);
        assert_eq!(result.correct, 10);
        assert_eq!(result.recommendation.label(), "Advanced (B2/C1)");
    }

    #[test]
    fn test_reorder_is_case_sensitive() {
        let bank = QuestionBank::builtin().unwrap();
        let id = bank
            .sentence_reorder()
            .find(|q| q.expected_answer() == Some("My name is Tom"))
            .map(|q| q.id())
            .unwrap();

        let exact = score(&bank, &UserAnswers::from([(id, "My name is Tom".to_string())]));
        assert_eq!(exact.correct, 1);

        let lower = score(&bank, &UserAnswers::from([(id, "my name is tom".to_string())]));
        assert_eq!(lower.correct, 0);

        let spaced = score(&bank, &UserAnswers::from([(id, "My name is  Tom".to_string())]));
        assert_eq!(spaced.correct, 0);
    }

    #[test]
    fn test_intermediate_band() {
        let bank = QuestionBank::builtin().unwrap();
        let answers: UserAnswers = bank
            .fill_in_the_blank()
            .take(6)
            .map(|q| (q.id(), q.expected_answer().unwrap().to_string()))
            .collect();
        let result = score(&bank, &answers);
        assert_eq!(result.percentage, 60);
        assert_eq!(result.recommendation, Recommendation::Intermediate);
    }

    #[test]
    fn test_review_covers_shown_questions_only() {
        let bank = QuestionBank::builtin().unwrap();
        let quiz = compose_quiz(&bank, &mut StdRng::seed_from_u64(4));
        let mut answers = all_correct(&quiz.questions[..3]);
        let wrong_id = quiz.questions[3].id();
        answers.insert(wrong_id, "definitely wrong".to_string());

        let rows = review(&quiz.questions, &answers);
        assert_eq!(rows.len(), 10);
        assert!(rows[..3].iter().all(|r| r.correct));
        assert!(!rows[3].correct);
        assert_eq!(rows[3].given.as_deref(), Some("definitely wrong"));
        assert!(rows[4].given.is_none());
    }
}
