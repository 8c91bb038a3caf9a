use super::text_field::TextField;
use crate::api::{LessonContent, Page, Vocabulary};
use crate::grading::{grade_multiple_choice, grade_rewriting, Grade};
use crate::models::ApiRequest;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug)]
pub enum PickerAction {
    None,
    Back,
    Load(u64),
}

#[derive(Debug)]
pub struct LessonPickerScreen {
    pub input: TextField,
    pub error: Option<String>,
}

impl Default for LessonPickerScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LessonPickerScreen {
    pub fn new() -> Self {
        Self {
            input: TextField::new("Lesson number").digits_only(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc => PickerAction::Back,
            KeyCode::Enter => match self.input.value().parse::<u64>() {
                Ok(id) => {
                    self.error = None;
                    PickerAction::Load(id)
                }
                Err(_) => {
                    self.error = Some("Enter a lesson number".to_string());
                    PickerAction::None
                }
            },
            _ => {
                self.input.handle_key(key);
                PickerAction::None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonTab {
    Vocabulary,
    Grammar,
    Exercises,
}

impl LessonTab {
    pub const ALL: [LessonTab; 3] = [LessonTab::Vocabulary, LessonTab::Grammar, LessonTab::Exercises];

    pub fn title(&self) -> &'static str {
        match self {
            LessonTab::Vocabulary => "Vocabulary",
            LessonTab::Grammar => "Grammar",
            LessonTab::Exercises => "Exercises",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Position in the combined exercise list: multiple choice first, then
/// rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseRef {
    MultipleChoice(usize),
    Rewriting(usize),
}

#[derive(Debug)]
pub struct Practice {
    pub exercise: ExerciseRef,
    pub option_cursor: usize,
    pub answer: TextField,
    pub grade: Option<Grade>,
}

#[derive(Debug)]
pub enum LessonAction {
    None,
    Back,
    Request(ApiRequest),
}

#[derive(Debug)]
pub struct LessonScreen {
    pub lesson_id: u64,
    pub page_size: u32,
    pub content: Option<LessonContent>,
    pub tab: LessonTab,
    pub selected: usize,
    pub practice: Option<Practice>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LessonScreen {
    pub fn new(lesson_id: u64, page_size: u32) -> Self {
        Self {
            lesson_id,
            page_size,
            content: None,
            tab: LessonTab::Vocabulary,
            selected: 0,
            practice: None,
            loading: true,
            error: None,
        }
    }

    pub fn load_request(&self) -> ApiRequest {
        ApiRequest::LoadLesson {
            lesson_id: self.lesson_id,
            page_size: self.page_size,
        }
    }

    pub fn apply_content(&mut self, content: LessonContent) {
        if content.lesson_id != self.lesson_id {
            log::warn!(
                "Dropping content for lesson {} while showing {}",
                content.lesson_id,
                self.lesson_id
            );
            return;
        }
        self.content = Some(content);
        self.loading = false;
        self.error = None;
        self.selected = 0;
    }

    pub fn apply_page(&mut self, lesson_id: u64, page: Page<Vocabulary>) {
        if lesson_id != self.lesson_id {
            return;
        }
        if let Some(content) = self.content.as_mut() {
            content.vocabulary = page;
            self.selected = 0;
        }
        self.loading = false;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn exercise_refs(&self) -> Vec<ExerciseRef> {
        let Some(content) = &self.content else {
            return Vec::new();
        };
        let exercises = &content.exercises;
        (0..exercises.list_multiple_choice.len())
            .map(ExerciseRef::MultipleChoice)
            .chain((0..exercises.list_sentence_rewriting.len()).map(ExerciseRef::Rewriting))
            .collect()
    }

    pub fn exercise_prompt(&self, exercise: ExerciseRef) -> Option<&str> {
        let exercises = &self.content.as_ref()?.exercises;
        match exercise {
            ExerciseRef::MultipleChoice(i) => exercises
                .list_multiple_choice
                .get(i)
                .map(|e| e.question.as_str()),
            ExerciseRef::Rewriting(i) => exercises
                .list_sentence_rewriting
                .get(i)
                .map(|e| e.original_sentence.as_str()),
        }
    }

    pub fn options(&self, exercise: ExerciseRef) -> &[String] {
        match (exercise, &self.content) {
            (ExerciseRef::MultipleChoice(i), Some(content)) => content
                .exercises
                .list_multiple_choice
                .get(i)
                .map(|e| e.options.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    fn item_count(&self) -> usize {
        match (&self.content, self.tab) {
            (None, _) => 0,
            (Some(c), LessonTab::Vocabulary) => c.vocabulary.content.len(),
            (Some(c), LessonTab::Grammar) => c.grammar.len(),
            (Some(c), LessonTab::Exercises) => c.exercises.len(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LessonAction {
        if self.practice.is_some() {
            self.handle_practice_key(key);
            return LessonAction::None;
        }

        match key.code {
            KeyCode::Esc => return LessonAction::Back,
            KeyCode::Tab | KeyCode::Right => self.switch_tab(1),
            KeyCode::BackTab | KeyCode::Left => self.switch_tab(LessonTab::ALL.len() - 1),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.item_count().saturating_sub(1));
            }
            KeyCode::Char('r') if !self.loading => {
                self.loading = true;
                self.error = None;
                return LessonAction::Request(self.load_request());
            }
            KeyCode::Char('n') => return self.turn_page(true),
            KeyCode::Char('p') => return self.turn_page(false),
            KeyCode::Enter if self.tab == LessonTab::Exercises => {
                if let Some(exercise) = self.exercise_refs().get(self.selected).copied() {
                    self.practice = Some(Practice {
                        exercise,
                        option_cursor: 0,
                        answer: TextField::new("Your answer"),
                        grade: None,
                    });
                }
            }
            _ => {}
        }
        LessonAction::None
    }

    fn switch_tab(&mut self, step: usize) {
        let next = (self.tab.position() + step) % LessonTab::ALL.len();
        self.tab = LessonTab::ALL[next];
        self.selected = 0;
    }

    fn turn_page(&mut self, forward: bool) -> LessonAction {
        if self.tab != LessonTab::Vocabulary || self.loading {
            return LessonAction::None;
        }
        let Some(content) = &self.content else {
            return LessonAction::None;
        };
        let page = &content.vocabulary;
        let target = if forward && page.has_next() {
            page.number + 1
        } else if !forward && page.has_previous() {
            page.number - 1
        } else {
            return LessonAction::None;
        };

        self.loading = true;
        LessonAction::Request(ApiRequest::LoadVocabularyPage {
            lesson_id: self.lesson_id,
            page: target,
            size: self.page_size,
        })
    }

    fn handle_practice_key(&mut self, key: KeyEvent) {
        let Some(content) = &self.content else {
            self.practice = None;
            return;
        };
        let Some(practice) = self.practice.as_mut() else {
            return;
        };

        if key.code == KeyCode::Esc || (key.code == KeyCode::Enter && practice.grade.is_some()) {
            self.practice = None;
            return;
        }
        if practice.grade.is_some() {
            return;
        }

        match practice.exercise {
            ExerciseRef::MultipleChoice(i) => {
                let Some(exercise) = content.exercises.list_multiple_choice.get(i) else {
                    return;
                };
                match key.code {
                    KeyCode::Up => practice.option_cursor = practice.option_cursor.saturating_sub(1),
                    KeyCode::Down => {
                        practice.option_cursor = (practice.option_cursor + 1)
                            .min(exercise.options.len().saturating_sub(1));
                    }
                    KeyCode::Enter => {
                        if let Some(chosen) = exercise.options.get(practice.option_cursor) {
                            practice.grade = Some(grade_multiple_choice(exercise, chosen));
                        }
                    }
                    _ => {}
                }
            }
            ExerciseRef::Rewriting(i) => {
                let Some(exercise) = content.exercises.list_sentence_rewriting.get(i) else {
                    return;
                };
                if key.code == KeyCode::Enter {
                    if !practice.answer.value().trim().is_empty() {
                        practice.grade = Some(grade_rewriting(exercise, practice.answer.value()));
                    }
                } else {
                    practice.answer.handle_key(key);
                }
            }
        }
    }
}
