// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,

    /// XP awarded for a correct answer.
    pub xp_correct: i64,
    /// XP awarded for an incorrect answer.
    pub xp_incorrect: i64,
    /// How long cached facet listings stay fresh, in seconds.
    pub facet_cache_ttl: u64,
    /// Default (and maximum) number of leaderboard rows returned.
    pub leaderboard_limit: usize,
    /// Default trailing window for the daily accuracy series, in days.
    pub daily_series_days: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600 * 24);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            xp_correct: env_or("XP_CORRECT", 20),
            xp_incorrect: env_or("XP_INCORRECT", 5),
            facet_cache_ttl: env_or("FACET_CACHE_TTL", 300),
            leaderboard_limit: env_or("LEADERBOARD_LIMIT", 100),
            daily_series_days: env_or("DAILY_SERIES_DAYS", 30),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
