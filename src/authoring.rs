use crate::api::{ApiClient, ApiError, Role};
use crate::session_context::SessionContext;
use crate::validation::{collect, require, ValidationError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;
pub const MIN_ORDERING_ITEMS: usize = 2;

lazy_static! {
    static ref BLANK: Regex = Regex::new(r"_{3,}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    MultipleChoice,
    SentenceRewriting,
    Cloze,
    ListeningDictation,
    Ordering,
}

impl ExerciseKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ExerciseKind::MultipleChoice => "multiple-choice",
            ExerciseKind::SentenceRewriting => "sentence-rewriting",
            ExerciseKind::Cloze => "cloze",
            ExerciseKind::ListeningDictation => "listening-dictation",
            ExerciseKind::Ordering => "ordering",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRewritingDraft {
    pub original_sentence: String,
    pub rewritten_sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeDraft {
    pub text: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningDictationDraft {
    pub audio_url: String,
    pub transcript: String,
}

/// Paragraphs or sentences listed in their correct order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingDraft {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyDraft {
    pub word: String,
    pub meaning: String,
    #[serde(rename = "type")]
    pub word_type: String,
    #[serde(default)]
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExerciseDraft {
    MultipleChoice(MultipleChoiceDraft),
    SentenceRewriting(SentenceRewritingDraft),
    Cloze(ClozeDraft),
    ListeningDictation(ListeningDictationDraft),
    Ordering(OrderingDraft),
}

/// Request body for an exercise draft, without the `kind` tag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExerciseBody<'a> {
    MultipleChoice(&'a MultipleChoiceDraft),
    SentenceRewriting(&'a SentenceRewritingDraft),
    Cloze(&'a ClozeDraft),
    ListeningDictation(&'a ListeningDictationDraft),
    Ordering(&'a OrderingDraft),
}

impl ExerciseDraft {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseDraft::MultipleChoice(_) => ExerciseKind::MultipleChoice,
            ExerciseDraft::SentenceRewriting(_) => ExerciseKind::SentenceRewriting,
            ExerciseDraft::Cloze(_) => ExerciseKind::Cloze,
            ExerciseDraft::ListeningDictation(_) => ExerciseKind::ListeningDictation,
            ExerciseDraft::Ordering(_) => ExerciseKind::Ordering,
        }
    }

    pub fn body(&self) -> ExerciseBody<'_> {
        match self {
            ExerciseDraft::MultipleChoice(d) => ExerciseBody::MultipleChoice(d),
            ExerciseDraft::SentenceRewriting(d) => ExerciseBody::SentenceRewriting(d),
            ExerciseDraft::Cloze(d) => ExerciseBody::Cloze(d),
            ExerciseDraft::ListeningDictation(d) => ExerciseBody::ListeningDictation(d),
            ExerciseDraft::Ordering(d) => ExerciseBody::Ordering(d),
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        match self {
            ExerciseDraft::MultipleChoice(d) => validate_multiple_choice(d),
            ExerciseDraft::SentenceRewriting(d) => validate_sentence_rewriting(d),
            ExerciseDraft::Cloze(d) => validate_cloze(d),
            ExerciseDraft::ListeningDictation(d) => validate_listening_dictation(d),
            ExerciseDraft::Ordering(d) => validate_ordering(d),
        }
    }
}

impl VocabularyDraft {
    pub fn validate(&self) -> Vec<ValidationError> {
        collect([
            require(&self.word, "Word"),
            require(&self.meaning, "Meaning"),
            require(&self.word_type, "Word type"),
        ])
    }
}

/// Anything a teacher can author from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Draft {
    Exercise(ExerciseDraft),
    Vocabulary(VocabularyFile),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VocabularyFile {
    Vocabulary(VocabularyDraft),
}

impl Draft {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn label(&self) -> String {
        match self {
            Draft::Exercise(d) => format!("{} exercise", d.kind()),
            Draft::Vocabulary(_) => "vocabulary item".to_string(),
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        match self {
            Draft::Exercise(d) => d.validate(),
            Draft::Vocabulary(VocabularyFile::Vocabulary(d)) => d.validate(),
        }
    }
}

pub fn count_blanks(text: &str) -> usize {
    BLANK.find_iter(text).count()
}

fn validate_multiple_choice(draft: &MultipleChoiceDraft) -> Vec<ValidationError> {
    let mut errors = collect([
        require(&draft.question, "Question"),
        require(&draft.correct_answer, "Correct answer"),
    ]);

    let found = draft.options.len();
    if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&found) {
        errors.push(ValidationError::OptionCount {
            min: MIN_OPTIONS,
            max: MAX_OPTIONS,
            found,
        });
    }

    let mut seen = HashSet::new();
    for option in &draft.options {
        let trimmed = option.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::Required("Option"));
        } else if !seen.insert(trimmed) {
            errors.push(ValidationError::DuplicateOption(trimmed.to_string()));
        }
    }

    let answer = draft.correct_answer.trim();
    if !answer.is_empty() && !draft.options.iter().any(|o| o.trim() == answer) {
        errors.push(ValidationError::CorrectAnswerNotAnOption(answer.to_string()));
    }

    errors
}

fn validate_sentence_rewriting(draft: &SentenceRewritingDraft) -> Vec<ValidationError> {
    let mut errors = collect([
        require(&draft.original_sentence, "Original sentence"),
        require(&draft.rewritten_sentence, "Rewritten sentence"),
    ]);
    if errors.is_empty() && draft.original_sentence.trim() == draft.rewritten_sentence.trim() {
        errors.push(ValidationError::RewriteUnchanged);
    }
    errors
}

fn validate_cloze(draft: &ClozeDraft) -> Vec<ValidationError> {
    let mut errors = collect([require(&draft.text, "Text")]);
    let blanks = count_blanks(&draft.text);
    if blanks == 0 {
        errors.push(ValidationError::NoBlanks);
    } else if blanks != draft.answers.len() {
        errors.push(ValidationError::BlankCountMismatch {
            blanks,
            answers: draft.answers.len(),
        });
    }
    if draft.answers.iter().any(|a| a.trim().is_empty()) {
        errors.push(ValidationError::Required("Answer"));
    }
    errors
}

fn validate_listening_dictation(draft: &ListeningDictationDraft) -> Vec<ValidationError> {
    let mut errors = collect([require(&draft.transcript, "Transcript")]);
    let url = draft.audio_url.trim();
    if url.is_empty() {
        errors.push(ValidationError::Required("Audio URL"));
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ValidationError::InvalidAudioUrl(url.to_string()));
    }
    errors
}

fn validate_ordering(draft: &OrderingDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let filled: Vec<&str> = draft
        .items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();

    if filled.len() < draft.items.len() {
        errors.push(ValidationError::Required("Item"));
    }
    if filled.len() < MIN_ORDERING_ITEMS {
        errors.push(ValidationError::TooFewItems {
            min: MIN_ORDERING_ITEMS,
            found: filled.len(),
        });
    }
    let mut seen = HashSet::new();
    for item in filled {
        if !seen.insert(item) {
            errors.push(ValidationError::DuplicateItem(item.to_string()));
        }
    }
    errors
}

/// Authoring is limited to signed-in teacher accounts.
pub fn require_teacher(session: Option<&SessionContext>) -> Result<&SessionContext, ApiError> {
    match session {
        None => Err(ApiError::NotSignedIn),
        Some(s) if s.role != Role::Teacher => Err(ApiError::Forbidden),
        Some(s) => Ok(s),
    }
}

pub async fn submit_draft(
    client: &ApiClient,
    draft: &Draft,
    lesson_id: u64,
) -> Result<serde_json::Value, ApiError> {
    match draft {
        Draft::Exercise(d) => client.create_exercise(lesson_id, d).await,
        Draft::Vocabulary(VocabularyFile::Vocabulary(d)) => {
            client.create_vocabulary(lesson_id, d).await
        }
    }
}

pub async fn update_draft(
    client: &ApiClient,
    draft: &Draft,
    id: u64,
) -> Result<serde_json::Value, ApiError> {
    match draft {
        Draft::Exercise(d) => client.update_exercise(id, d).await,
        Draft::Vocabulary(VocabularyFile::Vocabulary(d)) => client.update_vocabulary(id, d).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice(options: &[&str], answer: &str) -> ExerciseDraft {
        ExerciseDraft::MultipleChoice(MultipleChoiceDraft {
            question: "Which word is a verb?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: answer.to_string(),
        })
    }

    #[test]
    fn test_valid_multiple_choice() {
        let draft = multiple_choice(&["run", "apple", "blue"], "run");
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_multiple_choice_answer_must_be_option() {
        let draft = multiple_choice(&["run", "apple"], "jump");
        assert_eq!(
            draft.validate(),
            vec![ValidationError::CorrectAnswerNotAnOption("jump".to_string())]
        );
    }

    #[test]
    fn test_multiple_choice_option_rules() {
        let draft = multiple_choice(&["run"], "run");
        assert!(draft.validate().contains(&ValidationError::OptionCount {
            min: 2,
            max: 6,
            found: 1
        }));

        let draft = multiple_choice(&["run", " run ", ""], "run");
        let errors = draft.validate();
        assert!(errors.contains(&ValidationError::DuplicateOption("run".to_string())));
        assert!(errors.contains(&ValidationError::Required("Option")));
    }

    #[test]
    fn test_sentence_rewriting_must_change() {
        let draft = ExerciseDraft::SentenceRewriting(SentenceRewritingDraft {
            original_sentence: "He wrote the letter.".to_string(),
            rewritten_sentence: " He wrote the letter. ".to_string(),
            hint: None,
        });
        assert_eq!(draft.validate(), vec![ValidationError::RewriteUnchanged]);
    }

    #[test]
    fn test_cloze_blank_count() {
        let ok = ExerciseDraft::Cloze(ClozeDraft {
            text: "I ___ to school and ____ home.".to_string(),
            answers: vec!["go".to_string(), "walk".to_string()],
        });
        assert!(ok.validate().is_empty());

        let mismatch = ExerciseDraft::Cloze(ClozeDraft {
            text: "I ___ to school.".to_string(),
            answers: vec!["go".to_string(), "walk".to_string()],
        });
        assert_eq!(
            mismatch.validate(),
            vec![ValidationError::BlankCountMismatch { blanks: 1, answers: 2 }]
        );

        let none = ExerciseDraft::Cloze(ClozeDraft {
            text: "I go to school.".to_string(),
            answers: vec![],
        });
        assert_eq!(none.validate(), vec![ValidationError::NoBlanks]);
    }

    #[test]
    fn test_listening_dictation_url() {
        let draft = ExerciseDraft::ListeningDictation(ListeningDictationDraft {
            audio_url: "ftp://files/a.mp3".to_string(),
            transcript: "Good morning".to_string(),
        });
        assert_eq!(
            draft.validate(),
            vec![ValidationError::InvalidAudioUrl("ftp://files/a.mp3".to_string())]
        );
    }

    #[test]
    fn test_ordering_rules() {
        let draft = ExerciseDraft::Ordering(OrderingDraft {
            items: vec!["First".to_string(), "First".to_string(), " ".to_string()],
        });
        let errors = draft.validate();
        assert!(errors.contains(&ValidationError::Required("Item")));
        assert!(errors.contains(&ValidationError::DuplicateItem("First".to_string())));

        let short = ExerciseDraft::Ordering(OrderingDraft {
            items: vec!["Only one".to_string()],
        });
        assert_eq!(
            short.validate(),
            vec![ValidationError::TooFewItems { min: 2, found: 1 }]
        );
    }

    #[test]
    fn test_vocabulary_requires_fields() {
        let draft = VocabularyDraft {
            word: "apple".to_string(),
            meaning: String::new(),
            word_type: String::new(),
            example: String::new(),
            image: None,
        };
        assert_eq!(
            draft.validate(),
            vec![
                ValidationError::Required("Meaning"),
                ValidationError::Required("Word type")
            ]
        );
    }

    #[test]
    fn test_parse_draft_files() {
        let exercise: Draft = serde_json::from_str(
            r#"{"kind": "ordering", "items": ["Open the door.", "Walk in."]}"#,
        )
        .unwrap();
        assert_eq!(exercise.label(), "ordering exercise");
        assert!(exercise.validate().is_empty());

        let vocab: Draft = serde_json::from_str(
            r#"{"kind": "vocabulary", "word": "apple", "meaning": "a fruit", "type": "noun"}"#,
        )
        .unwrap();
        assert_eq!(vocab.label(), "vocabulary item");
    }

    #[test]
    fn test_body_has_no_kind_tag() {
        let draft = multiple_choice(&["run", "apple"], "run");
        let body = serde_json::to_value(draft.body()).unwrap();
        assert!(body.get("kind").is_none());
        assert_eq!(body["correctAnswer"], "run");
    }

    #[test]
    fn test_require_teacher() {
        let student = SessionContext {
            user_id: 1,
            email: "s@example.com".to_string(),
            full_name: "Stu".to_string(),
            role: Role::Student,
        };
        let teacher = SessionContext {
            role: Role::Teacher,
            ..student.clone()
        };
        assert!(matches!(require_teacher(None), Err(ApiError::NotSignedIn)));
        assert!(matches!(require_teacher(Some(&student)), Err(ApiError::Forbidden)));
        assert!(require_teacher(Some(&teacher)).is_ok());
    }
}
