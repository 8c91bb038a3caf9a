use crate::config::AppConfig;
use crate::db::placement::{list_results, load_answers, record_result, AnswerRecord, PlacementRecord};
use crate::models::{ApiRequest, ApiResponse, AppState, RequestKind, Route};
use crate::placement::{compose_quiz, review, score, QuestionBank, ReviewRow, UserAnswers};
use crate::screens::{
    LessonAction, LessonPickerScreen, LessonScreen, PickerAction, QuizAction, QuizScreen,
    ResultsAction, ResultsScreen, SignInAction, SignInScreen,
};
use crate::session_context::{SessionContext, SessionStore};
use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rusqlite::Connection;

pub const HISTORY_LIMIT: usize = 5;

/// Everything the event loop draws from and feeds keys into.
pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    bank: QuestionBank,
    db: Option<Connection>,
    store: SessionStore,
    pub session: Option<SessionContext>,
    api_tx: Sender<ApiRequest>,
    api_rx: Receiver<ApiResponse>,
    pub menu_index: usize,
    pub history: Vec<PlacementRecord>,
    pub sign_in: SignInScreen,
    pub quiz: Option<QuizScreen>,
    pub results: Option<ResultsScreen>,
    pub picker: LessonPickerScreen,
    pub lesson: Option<LessonScreen>,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        bank: QuestionBank,
        db: Option<Connection>,
        store: SessionStore,
        api_tx: Sender<ApiRequest>,
        api_rx: Receiver<ApiResponse>,
    ) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Ignoring stored session {}: {}", store.path().display(), e);
                None
            }
        };

        let mut app = Self {
            state: AppState::Welcome,
            config,
            bank,
            db,
            store,
            session,
            api_tx,
            api_rx,
            menu_index: 0,
            history: Vec::new(),
            sign_in: SignInScreen::new(),
            quiz: None,
            results: None,
            picker: LessonPickerScreen::new(),
            lesson: None,
            notice: None,
            should_quit: false,
        };
        app.refresh_history();
        app
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn refresh_history(&mut self) {
        let Some(conn) = &self.db else {
            return;
        };
        match list_results(conn, HISTORY_LIMIT) {
            Ok(records) => self.history = records,
            Err(e) => log::error!("Failed to load placement history: {}", e),
        }
    }

    fn send(&mut self, request: ApiRequest) -> bool {
        let kind = request.kind();
        if self.api_tx.send(request).is_err() {
            log::error!("API worker is gone; dropped {:?} request", kind);
            self.notice = Some("Background worker stopped; restart the app".to_string());
            return false;
        }
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Welcome => match key.code {
                KeyCode::Enter => self.state = AppState::Menu,
                KeyCode::Char('s') if self.session.is_none() => self.state = AppState::SignIn,
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            AppState::Menu => self.handle_menu_key(key),
            AppState::SignIn => match self.sign_in.handle_key(key) {
                SignInAction::Submit(request) => {
                    if !self.send(request) {
                        self.sign_in.fail("Could not reach the background worker".to_string());
                    }
                }
                SignInAction::Back => self.state = AppState::Menu,
                SignInAction::None => {}
            },
            AppState::Quiz => {
                let Some(quiz) = self.quiz.as_mut() else {
                    self.state = AppState::Menu;
                    return;
                };
                match quiz.handle_key(key) {
                    QuizAction::QuitRequested => self.state = AppState::QuizQuitConfirm,
                    QuizAction::Finished(answers) => self.finish_quiz(answers),
                    QuizAction::None => {}
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') => {
                    log::info!("Placement quiz abandoned");
                    self.quiz = None;
                    self.state = AppState::Menu;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state = AppState::Quiz,
                _ => {}
            },
            AppState::Results => {
                let action = match self.results.as_mut() {
                    Some(results) => results.handle_key(key),
                    None => ResultsAction::Menu,
                };
                match action {
                    ResultsAction::Menu => {
                        self.results = None;
                        self.state = AppState::Menu;
                    }
                    ResultsAction::Retake => self.start_quiz(),
                    ResultsAction::None => {}
                }
            }
            AppState::LessonPicker => match self.picker.handle_key(key) {
                PickerAction::Load(lesson_id) => self.open_lesson(lesson_id),
                PickerAction::Back => self.state = AppState::Menu,
                PickerAction::None => {}
            },
            AppState::Lesson => {
                let action = match self.lesson.as_mut() {
                    Some(lesson) => lesson.handle_key(key),
                    None => LessonAction::Back,
                };
                match action {
                    LessonAction::Request(request) => {
                        if !self.send(request)
                            && let Some(lesson) = self.lesson.as_mut()
                        {
                            lesson.fail("Could not reach the background worker".to_string());
                        }
                    }
                    LessonAction::Back => {
                        self.lesson = None;
                        self.state = AppState::LessonPicker;
                    }
                    LessonAction::None => {}
                }
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1).min(Route::ALL.len() - 1);
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.state = AppState::Welcome,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.open_history(index);
            }
            KeyCode::Enter => {
                self.notice = None;
                match Route::ALL[self.menu_index] {
                    Route::Placement => self.start_quiz(),
                    Route::Lessons => self.state = Route::Lessons.target(),
                    Route::Account if self.session.is_some() => self.sign_out(),
                    Route::Account => self.state = Route::Account.target(),
                }
            }
            _ => {}
        }
    }

    pub fn start_quiz(&mut self) {
        let quiz = compose_quiz(&self.bank, &mut rand::thread_rng());
        if quiz.questions.is_empty() {
            self.notice = Some("The question bank has no questions".to_string());
            self.state = AppState::Menu;
            return;
        }
        log::info!("Starting placement quiz with {} questions", quiz.questions.len());
        self.results = None;
        self.quiz = Some(QuizScreen::new(quiz));
        self.state = AppState::Quiz;
    }

    fn finish_quiz(&mut self, answers: UserAnswers) {
        let Some(quiz) = self.quiz.take() else {
            return;
        };
        let result = score(&self.bank, &answers);
        let rows = review(quiz.collector.questions(), &answers);
        log::info!(
            "Placement quiz finished: {}/{} ({}%), {}",
            result.correct,
            result.total,
            result.percentage,
            result.recommendation
        );

        let saved_id = self.db.as_ref().and_then(|conn| {
            let email = self.session.as_ref().map(|s| s.email.as_str());
            match record_result(conn, email, &result, quiz.collector.questions(), &answers) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::error!("Failed to save placement result: {}", e);
                    None
                }
            }
        });
        if self.db.is_some() && saved_id.is_none() {
            self.notice = Some("Result could not be saved to history".to_string());
        }

        self.results = Some(ResultsScreen::new(result, rows, saved_id));
        self.state = AppState::Results;
        self.refresh_history();
    }

    /// Shows a saved placement result with its stored answers.
    pub fn open_history(&mut self, index: usize) {
        let (Some(conn), Some(record)) = (&self.db, self.history.get(index)) else {
            return;
        };
        match load_answers(conn, record.id) {
            Ok(answers) => {
                let rows = stored_review(&self.bank, &answers);
                self.results = Some(ResultsScreen::new(record.result(), rows, Some(record.id)));
                self.state = AppState::Results;
            }
            Err(e) => {
                log::error!("Failed to load answers of result {}: {}", record.id, e);
                self.notice = Some("Could not load that result".to_string());
            }
        }
    }

    fn open_lesson(&mut self, lesson_id: u64) {
        let lesson = LessonScreen::new(lesson_id, self.config.page_size);
        let request = lesson.load_request();
        self.lesson = Some(lesson);
        self.state = AppState::Lesson;
        if !self.send(request)
            && let Some(lesson) = self.lesson.as_mut()
        {
            lesson.fail("Could not reach the background worker".to_string());
        }
    }

    fn sign_in_as(&mut self, context: SessionContext, created: bool) {
        if let Err(e) = self.store.save(&context) {
            log::warn!("Failed to persist session: {}", e);
        }
        log::info!("Signed in as {} ({})", context.email, context.role);
        self.notice = Some(if created {
            format!("Account created. Welcome, {}!", context.full_name)
        } else {
            format!("Welcome back, {}!", context.full_name)
        });
        self.session = Some(context);
        self.sign_in.pending = false;
        self.sign_in.reset_passwords();
        if self.state == AppState::SignIn {
            self.state = AppState::Menu;
        }
    }

    pub fn sign_out(&mut self) {
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to remove stored session: {}", e);
        }
        if let Some(session) = self.session.take() {
            log::info!("Signed out {}", session.email);
        }
        self.notice = Some("Signed out".to_string());
    }

    pub fn handle_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::SignedIn(profile) => self.sign_in_as(profile.into(), false),
            ApiResponse::SignedUp(profile) => self.sign_in_as(profile.into(), true),
            ApiResponse::LessonLoaded(content) => {
                if let Some(lesson) = self.lesson.as_mut() {
                    lesson.apply_content(content);
                }
            }
            ApiResponse::VocabularyPage { lesson_id, page } => {
                if let Some(lesson) = self.lesson.as_mut() {
                    lesson.apply_page(lesson_id, page);
                }
            }
            ApiResponse::Error { request, error } => {
                log::warn!("{:?} request failed: {}", request, error);
                match request {
                    RequestKind::SignIn | RequestKind::SignUp => self.sign_in.fail(error),
                    RequestKind::Lesson | RequestKind::Vocabulary => {
                        if let Some(lesson) = self.lesson.as_mut() {
                            lesson.fail(error);
                        }
                    }
                }
            }
        }
    }

    /// Drains finished worker responses. Returns whether anything changed.
    pub fn poll_responses(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.api_rx.try_recv() {
            self.handle_response(response);
            changed = true;
        }
        changed
    }
}

/// Review rows for answers read back from history. Questions missing from the
/// current bank keep their stored verdict.
fn stored_review(bank: &QuestionBank, answers: &[AnswerRecord]) -> Vec<ReviewRow> {
    answers
        .iter()
        .map(|a| {
            let question = bank.get(a.question_id);
            ReviewRow {
                prompt: question
                    .map(|q| q.prompt())
                    .unwrap_or_else(|| format!("Question #{}", a.question_id)),
                given: Some(a.answer.clone()),
                expected: question
                    .and_then(|q| q.expected_answer())
                    .unwrap_or_default()
                    .to_string(),
                correct: a.is_correct,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::MockBackend;
    use crate::api::{Role, UserProfile};
    use crate::api_worker::spawn_api_worker;
    use crate::db::run_migrations;
    use crate::placement::QuizQuestion;
    use crossbeam_channel::unbounded;
    use std::time::{Duration, Instant};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Harness {
        app: App,
        requests: Receiver<ApiRequest>,
        responses: Sender<ApiResponse>,
        _dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();
        let app = App::new(
            AppConfig::default(),
            QuestionBank::builtin().unwrap(),
            Some(conn),
            SessionStore::in_dir(dir.path()),
            request_tx,
            response_rx,
        );
        Harness {
            app,
            requests: request_rx,
            responses: response_tx,
            _dir: dir,
        }
    }

    fn answer_current(app: &mut App, correctly: bool) {
        let quiz = app.quiz.as_mut().unwrap();
        let question = quiz.collector.current().unwrap().clone();
        match question {
            QuizQuestion::FillInTheBlank { options, .. } => {
                let index = options.iter().position(|o| o.is_correct == correctly).unwrap();
                quiz.collector.select_option(index).unwrap();
            }
            QuizQuestion::SentenceReorder { correct_order, .. } => {
                let words: Vec<&str> = correct_order.split(' ').collect();
                let order: Vec<&str> = if correctly {
                    words
                } else {
                    words.into_iter().rev().collect()
                };
                for word in order {
                    let bank = quiz.collector.word_bank().unwrap();
                    let index = bank.available.iter().position(|w| w == word).unwrap();
                    quiz.collector.pick_word(index).unwrap();
                }
            }
        }
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_welcome_to_menu_and_quit() {
        let mut h = harness();
        assert_eq!(h.app.state, AppState::Welcome);
        h.app.handle_key(key(KeyCode::Enter));
        assert_eq!(h.app.state, AppState::Menu);

        h.app.handle_key(key(KeyCode::Down));
        h.app.handle_key(key(KeyCode::Down));
        h.app.handle_key(key(KeyCode::Down));
        assert_eq!(h.app.menu_index, 2);

        h.app.handle_key(key(KeyCode::Char('q')));
        assert!(h.app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut h = harness();
        h.app.start_quiz();
        h.app
            .handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(h.app.should_quit);
    }

    #[test]
    fn test_full_quiz_is_scored_and_saved() {
        let mut h = harness();
        h.app.state = AppState::Menu;
        h.app.handle_key(key(KeyCode::Enter));
        assert_eq!(h.app.state, AppState::Quiz);
        assert_eq!(h.app.quiz.as_ref().unwrap().collector.len(), 10);

        for i in 0..10 {
            answer_current(&mut h.app, i < 7);
        }

        assert_eq!(h.app.state, AppState::Results);
        let results = h.app.results.as_ref().unwrap();
        assert_eq!(results.result.correct, 7);
        assert_eq!(results.result.percentage, 70);
        assert_eq!(results.rows.len(), 10);
        assert!(results.saved_id.is_some());
        assert_eq!(h.app.history.len(), 1);
        assert!(h.app.quiz.is_none());

        h.app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(h.app.state, AppState::Menu);
    }

    #[test]
    fn test_history_entry_reopens_in_shown_order() {
        let mut h = harness();
        h.app.start_quiz();
        let shown: Vec<String> = h
            .app
            .quiz
            .as_ref()
            .unwrap()
            .collector
            .questions()
            .iter()
            .map(|q| q.prompt())
            .collect();
        for i in 0..10 {
            answer_current(&mut h.app, i % 2 == 0);
        }
        let fresh = h.app.results.take().unwrap();
        h.app.state = AppState::Menu;

        h.app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(h.app.state, AppState::Results);
        let reopened = h.app.results.as_ref().unwrap();
        assert_eq!(reopened.saved_id, fresh.saved_id);
        assert_eq!(reopened.result, fresh.result);
        assert_eq!(reopened.rows, fresh.rows);
        let prompts: Vec<String> = reopened.rows.iter().map(|r| r.prompt.clone()).collect();
        assert_eq!(prompts, shown);
    }

    #[test]
    fn test_history_key_without_entry_is_ignored() {
        let mut h = harness();
        h.app.state = AppState::Menu;
        h.app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(h.app.state, AppState::Menu);
        assert!(h.app.results.is_none());
    }

    #[test]
    fn test_quit_confirmation() {
        let mut h = harness();
        h.app.start_quiz();
        h.app.handle_key(key(KeyCode::Esc));
        assert_eq!(h.app.state, AppState::QuizQuitConfirm);

        h.app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(h.app.state, AppState::Quiz);
        assert!(h.app.quiz.is_some());

        h.app.handle_key(key(KeyCode::Esc));
        h.app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(h.app.state, AppState::Menu);
        assert!(h.app.quiz.is_none());
        assert!(h.app.history.is_empty());
    }

    #[test]
    fn test_sign_in_response_persists_session() {
        let mut h = harness();
        h.app.state = AppState::SignIn;
        h.app.sign_in.pending = true;

        h.responses
            .send(ApiResponse::SignedIn(UserProfile {
                user_id: 9,
                email: "teacher@example.com".to_string(),
                full_name: "Tess".to_string(),
                role: Role::Teacher,
            }))
            .unwrap();
        assert!(h.app.poll_responses());

        assert_eq!(h.app.state, AppState::Menu);
        assert!(h.app.session.as_ref().unwrap().is_teacher());
        assert!(!h.app.sign_in.pending);
        assert!(h.app.store.load().unwrap().is_some());

        h.app.menu_index = 2;
        h.app.handle_key(key(KeyCode::Enter));
        assert!(h.app.session.is_none());
        assert!(h.app.store.load().unwrap().is_none());
    }

    #[test]
    fn test_sign_in_error_shown_on_form() {
        let mut h = harness();
        h.app.state = AppState::SignIn;
        h.responses
            .send(ApiResponse::Error {
                request: RequestKind::SignIn,
                error: "Invalid email or password".to_string(),
            })
            .unwrap();
        h.app.poll_responses();
        assert_eq!(h.app.sign_in.errors, vec!["Invalid email or password"]);
        assert_eq!(h.app.state, AppState::SignIn);
        assert!(!h.app.poll_responses());
    }

    #[test]
    fn test_open_lesson_sends_request() {
        let mut h = harness();
        h.app.state = AppState::LessonPicker;
        h.app.handle_key(key(KeyCode::Char('7')));
        h.app.handle_key(key(KeyCode::Enter));

        assert_eq!(h.app.state, AppState::Lesson);
        match h.requests.try_recv().unwrap() {
            ApiRequest::LoadLesson {
                lesson_id,
                page_size,
            } => {
                assert_eq!(lesson_id, 7);
                assert_eq!(page_size, h.app.config.page_size);
            }
            other => panic!("unexpected request {:?}", other),
        }

        h.app.handle_key(key(KeyCode::Esc));
        assert_eq!(h.app.state, AppState::LessonPicker);
        assert!(h.app.lesson.is_none());
    }

    #[test]
    fn test_lesson_round_trip_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();
        let _handle = spawn_api_worker(MockBackend::new(), response_tx, request_rx).unwrap();
        let mut app = App::new(
            AppConfig::default(),
            QuestionBank::builtin().unwrap(),
            None,
            SessionStore::in_dir(dir.path()),
            request_tx,
            response_rx,
        );

        app.state = AppState::LessonPicker;
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Enter));

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.lesson.as_ref().is_some_and(|l| l.loading) && Instant::now() < deadline {
            app.poll_responses();
            std::thread::sleep(Duration::from_millis(10));
        }

        let lesson = app.lesson.as_ref().unwrap();
        let content = lesson.content.as_ref().unwrap();
        assert_eq!(content.vocabulary.content[0].word, "apple");
        assert_eq!(content.grammar.len(), 1);
        assert_eq!(content.exercises.len(), 2);
    }

    #[test]
    fn test_disconnected_worker_sets_notice() {
        let mut h = harness();
        drop(h.requests);
        h.app.state = AppState::LessonPicker;
        h.app.handle_key(key(KeyCode::Char('1')));
        h.app.handle_key(key(KeyCode::Enter));

        assert!(h.app.notice.is_some());
        assert!(h.app.lesson.as_ref().unwrap().error.is_some());
    }
}
