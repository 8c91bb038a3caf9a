mod lesson;
mod quiz;
mod results;
mod sign_in;
mod text_field;

pub use lesson::{
    ExerciseRef, LessonAction, LessonPickerScreen, LessonScreen, LessonTab, PickerAction, Practice,
};
pub use quiz::{QuizAction, QuizScreen, WordFocus};
pub use results::{ResultsAction, ResultsScreen};
pub use sign_in::{AuthMode, SignInAction, SignInScreen};
pub use text_field::TextField;
