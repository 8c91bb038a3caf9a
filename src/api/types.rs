use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "STUDENT", alias = "student", alias = "Student")]
    Student,
    #[serde(rename = "TEACHER", alias = "teacher", alias = "Teacher")]
    Teacher,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => f.write_str("student"),
            Role::Teacher => f.write_str("teacher"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "id")]
    pub user_id: u64,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Student
}

/// Spring-style page wrapper used by the paginated endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub vocab_id: u64,
    pub word: String,
    pub meaning: String,
    #[serde(rename = "type", default)]
    pub word_type: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub grammar_id: u64,
    pub grammar_title: String,
    #[serde(default)]
    pub grammar_content: String,
    #[serde(default)]
    pub grammar_usage: String,
    #[serde(default)]
    pub grammar_example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceExercise {
    #[serde(alias = "multipleChoiceId")]
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRewritingExercise {
    #[serde(alias = "sentenceRewritingId")]
    pub id: u64,
    pub original_sentence: String,
    pub rewritten_sentence: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonExercises {
    #[serde(default)]
    pub list_multiple_choice: Vec<MultipleChoiceExercise>,
    #[serde(default)]
    pub list_sentence_rewriting: Vec<SentenceRewritingExercise>,
}

impl LessonExercises {
    pub fn len(&self) -> usize {
        self.list_multiple_choice.len() + self.list_sentence_rewriting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the lesson screen shows for one lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonContent {
    pub lesson_id: u64,
    pub vocabulary: Page<Vocabulary>,
    pub grammar: Vec<Grammar>,
    pub exercises: LessonExercises,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sign_in_response() {
        let json = r#"{"userId": 42, "email": "ana@example.com", "fullName": "Ana Silva", "role": "TEACHER"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.full_name, "Ana Silva");
        assert_eq!(user.role, Role::Teacher);
    }

    #[test]
    fn test_parse_user_without_role() {
        let json = r#"{"id": 7, "email": "b@example.com", "fullName": "Bo"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn test_sign_up_request_is_camel_case() {
        let request = SignUpRequest {
            full_name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fullName"], "Ana Silva");
        assert!(value.get("full_name").is_none());
    }

    #[test]
    fn test_parse_vocabulary_page() {
        let json = r#"{
            "content": [
                {"vocabId": 1, "word": "apple", "meaning": "quả táo", "type": "noun", "example": "I eat an apple.", "image": null},
                {"vocabId": 2, "word": "run", "meaning": "chạy", "type": "verb", "example": "They run fast."}
            ],
            "totalPages": 3,
            "totalElements": 25,
            "number": 0,
            "size": 10
        }"#;
        let page: Page<Vocabulary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[1].word_type, "verb");
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_parse_exercises_with_missing_list() {
        let json = r#"{
            "listMultipleChoice": [
                {"id": 3, "question": "Pick the verb", "options": ["run", "apple"], "correctAnswer": "run"}
            ]
        }"#;
        let exercises: LessonExercises = serde_json::from_str(json).unwrap();
        assert_eq!(exercises.len(), 1);
        assert!(exercises.list_sentence_rewriting.is_empty());
    }

    #[test]
    fn test_parse_grammar_list() {
        let json = r#"[{"grammarId": 1, "grammarTitle": "Present simple", "grammarContent": "Habits", "grammarUsage": "Routines", "grammarExample": "I walk."}]"#;
        let grammar: Vec<Grammar> = serde_json::from_str(json).unwrap();
        assert_eq!(grammar[0].grammar_title, "Present simple");
    }
}
