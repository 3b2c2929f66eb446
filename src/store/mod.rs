// src/store/mod.rs

pub mod cache;
pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{
    answer::{AnswerHistoryRow, NewAnswer},
    facet::{FacetDimension, FacetValue},
    leaderboard::XpRow,
    progress::UserProgress,
    question::Question,
};

pub use postgres::PgStore;

/// Per-user correct/total counts used for batched accuracy lookups.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccuracyCounts {
    pub total: u32,
    pub correct: u32,
}

/// Data-access seam for the practice engine. Everything the engine needs
/// from the relational store goes through here; the engine itself stays a
/// set of pure functions over the returned rows.
#[async_trait]
pub trait PracticeStore: Send + Sync {
    /// Values of one facet dimension; `parent` narrows topics to a subject.
    async fn list_facet_values(
        &self,
        dimension: FacetDimension,
        parent: Option<i64>,
    ) -> Result<Vec<FacetValue>, AppError>;

    /// The active question corpus joined with subject/topic labels,
    /// newest first.
    async fn list_active_questions(&self) -> Result<Vec<Question>, AppError>;

    async fn get_question(&self, id: i64) -> Result<Option<Question>, AppError>;

    /// The user's full answer history joined with question facets.
    async fn answer_history(&self, user_id: i64) -> Result<Vec<AnswerHistoryRow>, AppError>;

    /// Persists one attempt and applies the XP/progress increments in the
    /// same transaction. A duplicate (user, question) pair yields
    /// `AppError::Conflict` and leaves progress untouched.
    async fn record_answer(&self, answer: &NewAnswer, xp_delta: i64) -> Result<(), AppError>;

    /// Current progress counters, zeroed when the user has none yet.
    async fn get_progress(&self, user_id: i64) -> Result<UserProgress, AppError>;

    /// Users eligible for ranking: everyone with progress, or only those
    /// with answer activity at or after `active_since` when given.
    async fn list_users_by_xp(
        &self,
        active_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<XpRow>, AppError>;

    /// Batched correct/total counts for a set of users (one query, not a
    /// per-row fan-out).
    async fn accuracy_for_users(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, AccuracyCounts>, AppError>;
}
