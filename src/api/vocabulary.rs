use super::client::{ApiClient, ApiError};
use super::types::{Page, Vocabulary};
use crate::authoring::VocabularyDraft;

const VOCABULARY_ROOT: &str = "/english-vocabulary-theories";

/// Path for listing or creating vocabulary of a lesson.
pub fn lesson_vocabulary_path(lesson_id: u64) -> String {
    format!("{}/{}", VOCABULARY_ROOT, lesson_id)
}

/// Path for updating or deleting one vocabulary item.
pub fn vocabulary_item_path(vocab_id: u64) -> String {
    format!("{}/{}", VOCABULARY_ROOT, vocab_id)
}

pub fn page_query(page: u32, size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("size", size.to_string())]
}

impl ApiClient {
    pub async fn vocabulary(
        &self,
        lesson_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<Vocabulary>, ApiError> {
        self.get_json(&lesson_vocabulary_path(lesson_id), &page_query(page, size))
            .await
    }

    pub async fn create_vocabulary(
        &self,
        lesson_id: u64,
        draft: &VocabularyDraft,
    ) -> Result<serde_json::Value, ApiError> {
        self.post_json(&lesson_vocabulary_path(lesson_id), draft).await
    }

    pub async fn update_vocabulary(
        &self,
        vocab_id: u64,
        draft: &VocabularyDraft,
    ) -> Result<serde_json::Value, ApiError> {
        self.put_json(&vocabulary_item_path(vocab_id), draft).await
    }

    pub async fn delete_vocabulary(&self, vocab_id: u64) -> Result<(), ApiError> {
        self.delete(&vocabulary_item_path(vocab_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_paths() {
        assert_eq!(lesson_vocabulary_path(3), "/english-vocabulary-theories/3");
        assert_eq!(vocabulary_item_path(99), "/english-vocabulary-theories/99");
    }

    #[test]
    fn test_page_query() {
        let query = page_query(2, 10);
        assert_eq!(query[0], ("page", "2".to_string()));
        assert_eq!(query[1], ("size", "10".to_string()));
    }
}
