use super::{QuizQuestion, UserAnswers};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error("Please answer this question before continuing")]
    Unanswered,
    #[error("No option at position {0}")]
    NoSuchOption(usize),
    #[error("No word at position {0}")]
    NoSuchWord(usize),
    #[error("This action does not apply to the current question")]
    WrongQuestionKind,
    #[error("The quiz is already finished")]
    Finished,
}

/// Word lists for one sentence-reorder question: what is left to pick and
/// what the user has assembled so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBank {
    pub available: Vec<String>,
    pub assembled: Vec<String>,
}

impl WordBank {
    pub fn new(parts: &[String]) -> Self {
        Self {
            available: parts.to_vec(),
            assembled: Vec::new(),
        }
    }

    pub fn pick(&mut self, index: usize) -> Result<(), CollectError> {
        if index >= self.available.len() {
            return Err(CollectError::NoSuchWord(index));
        }
        let word = self.available.remove(index);
        self.assembled.push(word);
        Ok(())
    }

    pub fn unpick(&mut self, index: usize) -> Result<(), CollectError> {
        if index >= self.assembled.len() {
            return Err(CollectError::NoSuchWord(index));
        }
        let word = self.assembled.remove(index);
        self.available.push(word);
        Ok(())
    }

    pub fn sentence(&self) -> String {
        self.assembled.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Moved(usize),
    Finished(UserAnswers),
}

/// Records one answer per question while the user steps through the quiz.
#[derive(Debug, Clone)]
pub struct AnswerCollector {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    selections: HashMap<usize, usize>,
    word_banks: HashMap<usize, WordBank>,
    answers: UserAnswers,
    finished: bool,
}

impl AnswerCollector {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let word_banks = questions
            .iter()
            .enumerate()
            .filter_map(|(i, q)| match q {
                QuizQuestion::SentenceReorder { sentence_parts, .. } => {
                    Some((i, WordBank::new(sentence_parts)))
                }
                QuizQuestion::FillInTheBlank { .. } => None,
            })
            .collect();

        Self {
            questions,
            current_index: 0,
            selections: HashMap::new(),
            word_banks,
            answers: UserAnswers::new(),
            finished: false,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selections.get(&self.current_index).copied()
    }

    pub fn word_bank(&self) -> Option<&WordBank> {
        self.word_banks.get(&self.current_index)
    }

    pub fn select_option(&mut self, option_index: usize) -> Result<(), CollectError> {
        self.ensure_open()?;
        match self.current() {
            Some(QuizQuestion::FillInTheBlank { options, .. }) => {
                if option_index >= options.len() {
                    return Err(CollectError::NoSuchOption(option_index));
                }
            }
            _ => return Err(CollectError::WrongQuestionKind),
        }
        self.selections.insert(self.current_index, option_index);
        Ok(())
    }

    pub fn pick_word(&mut self, index: usize) -> Result<(), CollectError> {
        self.ensure_open()?;
        self.current_word_bank_mut()?.pick(index)
    }

    pub fn unpick_word(&mut self, index: usize) -> Result<(), CollectError> {
        self.ensure_open()?;
        self.current_word_bank_mut()?.unpick(index)
    }

    /// Commits the current answer and steps forward. Past the last question
    /// the quiz finishes and the collected answers are returned.
    pub fn advance(&mut self) -> Result<Progress, CollectError> {
        self.ensure_open()?;
        let (id, answer) = self.current_answer()?;
        self.answers.insert(id, answer);

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Ok(Progress::Moved(self.current_index))
        } else {
            self.finished = true;
            Ok(Progress::Finished(self.answers.clone()))
        }
    }

    pub fn back(&mut self) -> Result<usize, CollectError> {
        self.ensure_open()?;
        self.current_index = self.current_index.saturating_sub(1);
        Ok(self.current_index)
    }

    fn ensure_open(&self) -> Result<(), CollectError> {
        if self.finished {
            Err(CollectError::Finished)
        } else {
            Ok(())
        }
    }

    fn current_word_bank_mut(&mut self) -> Result<&mut WordBank, CollectError> {
        self.word_banks
            .get_mut(&self.current_index)
            .ok_or(CollectError::WrongQuestionKind)
    }

    fn current_answer(&self) -> Result<(u32, String), CollectError> {
        match self.current() {
            Some(QuizQuestion::FillInTheBlank { id, options, .. }) => self
                .selected_option()
                .and_then(|i| options.get(i))
                .map(|o| (*id, o.text.clone()))
                .ok_or(CollectError::Unanswered),
            Some(QuizQuestion::SentenceReorder { id, .. }) => {
                let sentence = self.word_bank().map(WordBank::sentence).unwrap_or_default();
                if sentence.is_empty() {
                    Err(CollectError::Unanswered)
                } else {
                    Ok((*id, sentence))
                }
            }
            None => Err(CollectError::Finished),
        }
    }
}
