use super::{QuestionBank, QuizQuestion};
use rand::seq::SliceRandom;
use rand::Rng;

pub const QUESTIONS_PER_KIND: usize = 5;

/// How many questions of each kind the bank could not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub fill_in_the_blank: usize,
    pub sentence_reorder: usize,
}

impl Shortfall {
    pub fn message(&self) -> String {
        format!(
            "Question bank is too small: missing {} fill-in-the-blank and {} reorder question(s)",
            self.fill_in_the_blank, self.sentence_reorder
        )
    }
}

#[derive(Debug, Clone)]
pub struct ComposedQuiz {
    pub questions: Vec<QuizQuestion>,
    pub shortfall: Option<Shortfall>,
}

/// Draws up to five questions of each kind without replacement. The
/// fill-in-the-blank block always comes before the reorder block.
pub fn compose_quiz<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> ComposedQuiz {
    let mut blanks: Vec<&QuizQuestion> = bank.fill_in_the_blank().collect();
    let mut reorders: Vec<&QuizQuestion> = bank.sentence_reorder().collect();

    blanks.shuffle(&mut *rng);
    reorders.shuffle(&mut *rng);
    blanks.truncate(QUESTIONS_PER_KIND);
    reorders.truncate(QUESTIONS_PER_KIND);

    let shortfall = if blanks.len() < QUESTIONS_PER_KIND || reorders.len() < QUESTIONS_PER_KIND {
        let shortfall = Shortfall {
            fill_in_the_blank: QUESTIONS_PER_KIND - blanks.len(),
            sentence_reorder: QUESTIONS_PER_KIND - reorders.len(),
        };
        log::warn!("{}", shortfall.message());
        Some(shortfall)
    } else {
        None
    };

    let questions = blanks.into_iter().chain(reorders).cloned().collect();

    ComposedQuiz {
        questions,
        shortfall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{AnswerOption, Difficulty, QuestionKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn bank_with(blanks: u32, reorders: u32) -> QuestionBank {
        let mut questions = Vec::new();
        for id in 0..blanks {
            questions.push(QuizQuestion::FillInTheBlank {
                id,
                question_text: format!("Sentence {} ___.", id),
                options: vec![
                    AnswerOption { text: "a".into(), is_correct: true },
                    AnswerOption { text: "b".into(), is_correct: false },
                    AnswerOption { text: "c".into(), is_correct: false },
                    AnswerOption { text: "d".into(), is_correct: false },
                ],
                difficulty: Difficulty::Easy,
            });
        }
        for id in 0..reorders {
            questions.push(QuizQuestion::SentenceReorder {
                id: 1000 + id,
                sentence_parts: vec!["b".into(), "a".into()],
                correct_order: "a b".into(),
                difficulty: Difficulty::Medium,
                hint: String::new(),
            });
        }
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn test_compose_shape() {
        let bank = bank_with(12, 11);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = compose_quiz(&bank, &mut rng);
            assert_eq!(quiz.questions.len(), 10);
            assert!(quiz.shortfall.is_none());
            assert!(quiz.questions[..5]
                .iter()
                .all(|q| q.kind() == QuestionKind::FillInTheBlank));
            assert!(quiz.questions[5..]
                .iter()
                .all(|q| q.kind() == QuestionKind::SentenceReorder));
        }
    }

    #[test]
    fn test_compose_no_duplicates() {
        let bank = QuestionBank::builtin().unwrap();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let quiz = compose_quiz(&bank, &mut rng);
            let ids: HashSet<_> = quiz.questions.iter().map(|q| q.id()).collect();
            assert_eq!(ids.len(), quiz.questions.len());
        }
    }

    #[test]
    fn test_compose_exact_pool() {
        let bank = bank_with(5, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = compose_quiz(&bank, &mut rng);
        assert_eq!(quiz.questions.len(), 10);
        assert!(quiz.shortfall.is_none());
    }

    #[test]
    fn test_compose_short_pool() {
        let bank = bank_with(3, 6);
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = compose_quiz(&bank, &mut rng);
        assert_eq!(quiz.questions.len(), 8);
        assert_eq!(
            quiz.shortfall,
            Some(Shortfall {
                fill_in_the_blank: 2,
                sentence_reorder: 0,
            })
        );
        assert!(quiz.questions[..3]
            .iter()
            .all(|q| q.kind() == QuestionKind::FillInTheBlank));
    }

    #[test]
    fn test_compose_empty_pool() {
        let bank = QuestionBank::new(Vec::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = compose_quiz(&bank, &mut rng);
        assert!(quiz.questions.is_empty());
        assert!(quiz.shortfall.unwrap().message().contains("missing 5"));
    }
}
