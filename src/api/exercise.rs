use super::client::{ApiClient, ApiError};
use super::types::LessonExercises;
use crate::authoring::{ExerciseDraft, ExerciseKind};

const EXERCISE_ROOT: &str = "/english-exercise";

pub fn lesson_exercises_path(lesson_id: u64) -> String {
    format!("{}/{}", EXERCISE_ROOT, lesson_id)
}

/// Path for creating an exercise of `kind` in a lesson.
pub fn create_exercise_path(kind: ExerciseKind, lesson_id: u64) -> String {
    format!("{}/{}/{}", EXERCISE_ROOT, kind.path_segment(), lesson_id)
}

/// Path for updating or deleting one exercise of `kind`.
pub fn exercise_item_path(kind: ExerciseKind, exercise_id: u64) -> String {
    format!("{}/{}/{}", EXERCISE_ROOT, kind.path_segment(), exercise_id)
}

impl ApiClient {
    pub async fn exercises(&self, lesson_id: u64) -> Result<LessonExercises, ApiError> {
        self.get_json(&lesson_exercises_path(lesson_id), &[]).await
    }

    pub async fn create_exercise(
        &self,
        lesson_id: u64,
        draft: &ExerciseDraft,
    ) -> Result<serde_json::Value, ApiError> {
        let path = create_exercise_path(draft.kind(), lesson_id);
        log::info!("Creating {} exercise in lesson {}", draft.kind(), lesson_id);
        self.post_json(&path, &draft.body()).await
    }

    pub async fn update_exercise(
        &self,
        exercise_id: u64,
        draft: &ExerciseDraft,
    ) -> Result<serde_json::Value, ApiError> {
        let path = exercise_item_path(draft.kind(), exercise_id);
        log::info!("Updating {} exercise {}", draft.kind(), exercise_id);
        self.put_json(&path, &draft.body()).await
    }

    pub async fn delete_exercise(&self, kind: ExerciseKind, exercise_id: u64) -> Result<(), ApiError> {
        log::info!("Deleting {} exercise {}", kind, exercise_id);
        self.delete(&exercise_item_path(kind, exercise_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_paths() {
        assert_eq!(lesson_exercises_path(4), "/english-exercise/4");
        assert_eq!(
            create_exercise_path(ExerciseKind::MultipleChoice, 4),
            "/english-exercise/multiple-choice/4"
        );
        assert_eq!(
            exercise_item_path(ExerciseKind::ListeningDictation, 17),
            "/english-exercise/listening-dictation/17"
        );
        assert_eq!(
            exercise_item_path(ExerciseKind::Ordering, 2),
            "/english-exercise/ordering/2"
        );
    }
}
