use crate::placement::{
    AnswerCollector, CollectError, ComposedQuiz, Progress, QuizQuestion, UserAnswers,
};
use crossterm::event::{KeyCode, KeyEvent};

/// Which list of a reorder question the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFocus {
    Bank,
    Sentence,
}

#[derive(Debug, PartialEq)]
pub enum QuizAction {
    None,
    QuitRequested,
    Finished(UserAnswers),
}

#[derive(Debug)]
pub struct QuizScreen {
    pub collector: AnswerCollector,
    pub cursor: usize,
    pub focus: WordFocus,
    pub message: Option<String>,
    pub warning: Option<String>,
}

impl QuizScreen {
    pub fn new(quiz: ComposedQuiz) -> Self {
        Self {
            collector: AnswerCollector::new(quiz.questions),
            cursor: 0,
            focus: WordFocus::Bank,
            message: None,
            warning: quiz.shortfall.map(|s| s.message()),
        }
    }

    fn reset_cursor(&mut self) {
        self.cursor = self.collector.selected_option().unwrap_or(0);
        self.focus = WordFocus::Bank;
        self.message = None;
    }

    fn focused_len(&self) -> usize {
        match self.collector.current() {
            Some(QuizQuestion::FillInTheBlank { options, .. }) => options.len(),
            Some(QuizQuestion::SentenceReorder { .. }) => self
                .collector
                .word_bank()
                .map(|bank| match self.focus {
                    WordFocus::Bank => bank.available.len(),
                    WordFocus::Sentence => bank.assembled.len(),
                })
                .unwrap_or(0),
            None => 0,
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.focused_len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> QuizAction {
        match key.code {
            KeyCode::Esc => return QuizAction::QuitRequested,
            KeyCode::Enter => return self.advance(),
            KeyCode::Backspace => {
                if let Err(e) = self.collector.back() {
                    self.message = Some(e.to_string());
                } else {
                    self.reset_cursor();
                }
                return QuizAction::None;
            }
            _ => {}
        }

        let result = match self.collector.current() {
            Some(QuizQuestion::FillInTheBlank { .. }) => self.handle_option_key(key),
            Some(QuizQuestion::SentenceReorder { .. }) => self.handle_word_key(key),
            None => Ok(()),
        };
        match result {
            Ok(()) => self.message = None,
            Err(e) => self.message = Some(e.to_string()),
        }
        QuizAction::None
    }

    fn advance(&mut self) -> QuizAction {
        match self.collector.advance() {
            Ok(Progress::Moved(index)) => {
                log::debug!("Moved to question {}", index + 1);
                self.reset_cursor();
                QuizAction::None
            }
            Ok(Progress::Finished(answers)) => QuizAction::Finished(answers),
            Err(e) => {
                self.message = Some(e.to_string());
                QuizAction::None
            }
        }
    }

    fn handle_option_key(&mut self, key: KeyEvent) -> Result<(), CollectError> {
        match key.code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            KeyCode::Char(' ') => self.collector.select_option(self.cursor)?,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.collector.select_option(index)?;
                self.cursor = index;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_word_key(&mut self, key: KeyEvent) -> Result<(), CollectError> {
        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    WordFocus::Bank => WordFocus::Sentence,
                    WordFocus::Sentence => WordFocus::Bank,
                };
                self.cursor = 0;
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            KeyCode::Char(' ') => {
                match self.focus {
                    WordFocus::Bank => self.collector.pick_word(self.cursor)?,
                    WordFocus::Sentence => self.collector.unpick_word(self.cursor)?,
                }
                self.clamp_cursor();
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{AnswerOption, Difficulty, Shortfall};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_quiz() -> ComposedQuiz {
        ComposedQuiz {
            questions: vec![
                QuizQuestion::FillInTheBlank {
                    id: 1,
                    question_text: "She ___ a doctor.".to_string(),
                    options: ["is", "am", "are"]
                        .iter()
                        .map(|t| AnswerOption {
                            text: t.to_string(),
                            is_correct: *t == "is",
                        })
                        .collect(),
                    difficulty: Difficulty::Easy,
                },
                QuizQuestion::SentenceReorder {
                    id: 101,
                    sentence_parts: vec!["name".into(), "My".into(), "is".into()],
                    correct_order: "My name is".to_string(),
                    difficulty: Difficulty::Easy,
                    hint: "Start with My".to_string(),
                },
            ],
            shortfall: None,
        }
    }

    #[test]
    fn test_enter_without_answer_shows_message() {
        let mut screen = QuizScreen::new(sample_quiz());
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), QuizAction::None);
        assert_eq!(
            screen.message.as_deref(),
            Some("Please answer this question before continuing")
        );
        assert_eq!(screen.collector.current_index(), 0);
    }

    #[test]
    fn test_full_run() {
        let mut screen = QuizScreen::new(sample_quiz());
        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Char(' ')));
        // Overwrite with the number key before advancing.
        screen.handle_key(key(KeyCode::Char('1')));
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.collector.current_index(), 1);

        // Bank: name My is
        screen.handle_key(key(KeyCode::Right));
        screen.handle_key(key(KeyCode::Char(' '))); // My
        screen.handle_key(key(KeyCode::Left));
        screen.handle_key(key(KeyCode::Char(' '))); // name
        screen.handle_key(key(KeyCode::Char(' '))); // is
        assert_eq!(screen.collector.word_bank().unwrap().sentence(), "My name is");

        match screen.handle_key(key(KeyCode::Enter)) {
            QuizAction::Finished(answers) => {
                assert_eq!(answers[&1], "is");
                assert_eq!(answers[&101], "My name is");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_back_restores_selection() {
        let mut screen = QuizScreen::new(sample_quiz());
        screen.handle_key(key(KeyCode::Char('3')));
        screen.handle_key(key(KeyCode::Enter));
        screen.handle_key(key(KeyCode::Backspace));

        assert_eq!(screen.collector.current_index(), 0);
        assert_eq!(screen.collector.selected_option(), Some(2));
        assert_eq!(screen.cursor, 2);
    }

    #[test]
    fn test_unpick_from_sentence() {
        let mut screen = QuizScreen::new(sample_quiz());
        screen.handle_key(key(KeyCode::Char('1')));
        screen.handle_key(key(KeyCode::Enter));

        screen.handle_key(key(KeyCode::Char(' ')));
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus, WordFocus::Sentence);
        screen.handle_key(key(KeyCode::Char(' ')));

        let bank = screen.collector.word_bank().unwrap();
        assert!(bank.assembled.is_empty());
        assert_eq!(bank.available.len(), 3);
    }

    #[test]
    fn test_invalid_option_number() {
        let mut screen = QuizScreen::new(sample_quiz());
        screen.handle_key(key(KeyCode::Char('9')));
        assert_eq!(screen.message.as_deref(), Some("No option at position 8"));
        assert_eq!(screen.collector.selected_option(), None);
    }

    #[test]
    fn test_esc_requests_quit_and_shortfall_warning() {
        let mut quiz = sample_quiz();
        quiz.shortfall = Some(Shortfall {
            fill_in_the_blank: 4,
            sentence_reorder: 4,
        });
        let mut screen = QuizScreen::new(quiz);
        assert!(screen.warning.is_some());
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc)),
            QuizAction::QuitRequested
        );
    }
}
