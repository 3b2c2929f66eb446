// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_progress' table. `xp` only ever grows, and only
/// through the answer recorder's atomic increments.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: i64,
    pub xp: i64,
    pub questions_answered: i64,
}

/// Aggregated profile data for the current user.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub xp: i64,
    pub questions_answered: i64,
    pub level: u32,
    pub title: String,
    pub current_streak: u32,
    pub study_days: u32,
    pub accuracy: f64,
}
