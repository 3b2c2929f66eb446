// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A new answer attempt, ready to persist. One row per (user, question);
/// the database enforces the uniqueness that keeps statistics honest.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub user_id: i64,
    pub question_id: i64,
    pub selected_option: String,
    /// Derived server-side from the answer key, never client-supplied.
    pub correct: bool,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// One row of a user's answer history joined with the question's facets.
/// Input shape for the streak calculator and the statistics aggregator.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AnswerHistoryRow {
    pub question_id: i64,
    pub subject_id: i64,
    pub subject_label: String,
    pub topic_id: i64,
    pub topic_label: String,
    pub correct: bool,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting an answer attempt.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(range(min = 1))]
    pub question_id: i64,
    #[validate(length(min = 1, max = 1))]
    pub selected_option: String,
}

/// DTO returned after recording an attempt.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub correct_option: String,
    pub explanation: Option<String>,
    pub xp_awarded: i64,
}
