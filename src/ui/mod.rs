pub mod history;
pub mod layout;
mod lesson;
mod menu;
mod quiz;
mod results;
mod sign_in;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

pub use history::{format_history_item, format_taken_at};
pub use layout::{calculate_page_chunks, calculate_quiz_chunks, calculate_results_chunks};
pub use lesson::{draw_lesson, draw_lesson_picker};
pub use menu::{draw_menu, draw_welcome};
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use results::draw_results;
pub use sign_in::draw_sign_in;

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Welcome => draw_welcome(f, app),
        AppState::Menu => draw_menu(f, app),
        AppState::SignIn => draw_sign_in(f, &app.sign_in),
        AppState::Quiz => {
            if let Some(quiz) = &app.quiz {
                draw_quiz(f, quiz);
            }
        }
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Results => {
            if let Some(results) = &app.results {
                draw_results(f, results, app.notice.as_deref());
            }
        }
        AppState::LessonPicker => draw_lesson_picker(f, &app.picker),
        AppState::Lesson => {
            if let Some(lesson) = &app.lesson {
                draw_lesson(f, lesson);
            }
        }
    }
}
