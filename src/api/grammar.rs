use super::client::{ApiClient, ApiError};
use super::types::Grammar;

pub fn grammar_path(lesson_id: u64) -> String {
    format!("/english-grammar-theories/{}", lesson_id)
}

impl ApiClient {
    pub async fn grammar(&self, lesson_id: u64) -> Result<Vec<Grammar>, ApiError> {
        self.get_json(&grammar_path(lesson_id), &[]).await
    }
}
