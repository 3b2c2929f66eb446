// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

/// Answer option key. Questions carry 4 or 5 options; `E` only exists on
/// five-option questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
    E,
}

impl OptionKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(OptionKey::A),
            "B" => Some(OptionKey::B),
            "C" => Some(OptionKey::C),
            "D" => Some(OptionKey::D),
            "E" => Some(OptionKey::E),
            _ => None,
        }
    }

    /// Zero-based position into the question's options list.
    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
            OptionKey::E => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
            OptionKey::E => "E",
        }
    }
}

/// A question row joined with its subject/topic labels, as fetched for the
/// in-memory filter pass. The labels take part in free-text search.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub statement: String,

    /// Options in key order (index 0 = A). Stored as a JSON array.
    pub options: Json<Vec<String>>,

    /// The correct option key ("A".."E").
    pub correct_option: String,

    /// Explanation shown after answering.
    pub explanation: Option<String>,

    pub year: i32,

    pub subject_id: i64,
    pub topic_id: i64,
    pub board_id: i64,
    pub agency_id: i64,
    pub education_level_id: i64,

    pub subject_label: String,
    pub topic_label: String,

    pub active: bool,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for the practice listing (excludes the answer key and explanation),
/// annotated with the caller's answered status.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub statement: String,
    pub options: Json<Vec<String>>,
    pub year: i32,
    pub subject_id: i64,
    pub subject_label: String,
    pub topic_id: i64,
    pub topic_label: String,
    pub board_id: i64,
    pub agency_id: i64,
    pub education_level_id: i64,
    pub answered: bool,
    /// Correctness of the caller's recorded answer, absent when unanswered.
    pub answered_correct: Option<bool>,
}

impl PublicQuestion {
    pub fn from_question(q: &Question, answered_correct: Option<bool>) -> Self {
        Self {
            id: q.id,
            statement: q.statement.clone(),
            options: q.options.clone(),
            year: q.year,
            subject_id: q.subject_id,
            subject_label: q.subject_label.clone(),
            topic_id: q.topic_id,
            topic_label: q.topic_label.clone(),
            board_id: q.board_id,
            agency_id: q.agency_id,
            education_level_id: q.education_level_id,
            answered: answered_correct.is_some(),
            answered_correct,
        }
    }
}

/// Query params for the practice listing. `years` is a comma-separated
/// list; `status` is one of `any|unanswered|correct|incorrect`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionListParams {
    pub search: Option<String>,
    pub subject_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub board_id: Option<i64>,
    pub agency_id: Option<i64>,
    pub education_level_id: Option<i64>,
    pub years: Option<String>,
    pub status: Option<String>,
}
