// src/models/stats.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whole-history summary for one user. Recomputable purely from the
/// answer history, never persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_answered: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    /// Percentage in [0, 100]; 0 when nothing was answered.
    pub accuracy: f64,
    pub current_streak: u32,
    pub study_days: u32,
}

/// Per-subject or per-topic accuracy rollup.
#[derive(Debug, Serialize, Deserialize)]
pub struct FacetBreakdown {
    pub id: i64,
    pub label: String,
    pub total_answered: u32,
    pub total_correct: u32,
    pub accuracy: f64,
}

/// One entry of the weakness ranking: topics the user keeps getting wrong,
/// filtered to a minimum sample size.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeakTopic {
    pub topic_id: i64,
    pub topic_label: String,
    pub total_answered: u32,
    pub total_incorrect: u32,
    /// Fraction in [0, 1].
    pub error_rate: f64,
}

/// One point of the daily accuracy series. Days without activity are
/// present with zeroed counts so the chart axis stays contiguous.
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyAccuracy {
    pub date: NaiveDate,
    pub total_answered: u32,
    pub total_correct: u32,
    pub accuracy: f64,
}

/// Query params for the daily series window.
#[derive(Debug, Default, Deserialize)]
pub struct DailySeriesParams {
    pub days: Option<u32>,
}
