use crate::placement::scorer::is_correct;
use crate::placement::{PlacementResult, QuizQuestion, Recommendation, UserAnswers};
use rusqlite::{Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub id: u64,
    pub user_email: Option<String>,
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub recommendation: Recommendation,
    pub taken_at: u64,
}

impl PlacementRecord {
    pub fn result(&self) -> PlacementResult {
        PlacementResult {
            correct: self.correct,
            total: self.total,
            percentage: self.percentage,
            recommendation: self.recommendation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub answer: String,
    pub is_correct: bool,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Stores the result and one answer row per answered question, in the order
/// `questions` were shown.
pub fn record_result(
    conn: &Connection,
    user_email: Option<&str>,
    result: &PlacementResult,
    questions: &[QuizQuestion],
    answers: &UserAnswers,
) -> Result<u64> {
    let taken_at = now();
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO placement_results (user_email, correct, total, percentage, recommendation, taken_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            user_email,
            result.correct,
            result.total,
            result.percentage,
            result.recommendation.label(),
            taken_at
        ],
    )?;
    let result_id = tx.last_insert_rowid() as u64;

    for (order, question) in questions.iter().enumerate() {
        let Some(answer) = answers.get(&question.id()) else {
            continue;
        };
        tx.execute(
            "INSERT INTO placement_answers (result_id, question_id, answer, is_correct, display_order)
             VALUES (?, ?, ?, ?, ?)",
            rusqlite::params![
                result_id,
                question.id(),
                answer,
                is_correct(question, answer),
                order
            ],
        )?;
    }

    tx.commit()?;
    log::info!(
        "Recorded placement result {} ({}/{})",
        result_id,
        result.correct,
        result.total
    );
    Ok(result_id)
}

fn row_to_record(row: &rusqlite::Row) -> Result<PlacementRecord> {
    let label: String = row.get(5)?;
    let recommendation = Recommendation::parse(&label).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            format!("unknown recommendation {}", label).into(),
        )
    })?;

    Ok(PlacementRecord {
        id: row.get(0)?,
        user_email: row.get(1)?,
        correct: row.get(2)?,
        total: row.get(3)?,
        percentage: row.get(4)?,
        recommendation,
        taken_at: row.get(6)?,
    })
}

/// Newest first.
pub fn list_results(conn: &Connection, limit: usize) -> Result<Vec<PlacementRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_email, correct, total, percentage, recommendation, taken_at
         FROM placement_results ORDER BY taken_at DESC, id DESC LIMIT ?",
    )?;

    let records = stmt
        .query_map([limit as i64], row_to_record)?
        .collect::<Result<Vec<_>>>()?;

    Ok(records)
}

pub fn load_answers(conn: &Connection, result_id: u64) -> Result<Vec<AnswerRecord>> {
    let mut stmt = conn.prepare(
        "SELECT question_id, answer, is_correct FROM placement_answers
         WHERE result_id = ? ORDER BY display_order",
    )?;

    let answers = stmt
        .query_map([result_id], |row| {
            Ok(AnswerRecord {
                question_id: row.get(0)?,
                answer: row.get(1)?,
                is_correct: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(answers)
}
