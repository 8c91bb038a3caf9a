use crate::api::{LessonContent, Page, SignInRequest, SignUpRequest, UserProfile, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    SignIn,
    Menu,
    Quiz,
    QuizQuitConfirm,
    Results,
    LessonPicker,
    Lesson,
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Placement,
    Lessons,
    Account,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Placement, Route::Lessons, Route::Account];

    pub fn icon(&self) -> &'static str {
        match self {
            Route::Placement => "✎",
            Route::Lessons => "▤",
            Route::Account => "☺",
        }
    }

    pub fn title(&self, signed_in: bool) -> &'static str {
        match self {
            Route::Placement => "Placement quiz",
            Route::Lessons => "Lessons",
            Route::Account if signed_in => "Sign out",
            Route::Account => "Sign in",
        }
    }

    pub fn target(&self) -> AppState {
        match self {
            Route::Placement => AppState::Quiz,
            Route::Lessons => AppState::LessonPicker,
            Route::Account => AppState::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    SignIn,
    SignUp,
    Lesson,
    Vocabulary,
}

#[derive(Debug)]
pub enum ApiRequest {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
    LoadLesson {
        lesson_id: u64,
        page_size: u32,
    },
    LoadVocabularyPage {
        lesson_id: u64,
        page: u32,
        size: u32,
    },
}

impl ApiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ApiRequest::SignIn(_) => RequestKind::SignIn,
            ApiRequest::SignUp(_) => RequestKind::SignUp,
            ApiRequest::LoadLesson { .. } => RequestKind::Lesson,
            ApiRequest::LoadVocabularyPage { .. } => RequestKind::Vocabulary,
        }
    }
}

#[derive(Debug)]
pub enum ApiResponse {
    SignedIn(UserProfile),
    SignedUp(UserProfile),
    LessonLoaded(LessonContent),
    VocabularyPage {
        lesson_id: u64,
        page: Page<Vocabulary>,
    },
    Error {
        request: RequestKind,
        error: String,
    },
}
