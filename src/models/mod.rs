// src/models/mod.rs

pub mod answer;
pub mod facet;
pub mod leaderboard;
pub mod progress;
pub mod question;
pub mod stats;
