// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user eligible for ranking: the raw row the store hands to the
/// leaderboard engine, already joined with the display name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct XpRow {
    pub user_id: i64,
    pub name: String,
    pub xp: i64,
}

/// One displayed leaderboard row.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: i64,
    pub name: String,
    pub xp: i64,
    pub accuracy: f64,
}

/// The caller's own position, reported even when outside the cut.
#[derive(Debug, Serialize, Deserialize)]
pub struct MyPosition {
    pub rank: usize,
    pub xp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub me: Option<MyPosition>,
}

/// Query params for the ranking endpoint.
/// `period` is one of `all|day|week|month` (default `all`).
#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub period: Option<String>,
    pub limit: Option<usize>,
}
