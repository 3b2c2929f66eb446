// src/handlers/ranking.rs

use axum::{Extension, Json, extract::{Query, State}, response::IntoResponse};
use chrono::{Duration, Utc};

use crate::{
    engine::{accuracy_pct, leaderboard},
    error::AppError,
    models::leaderboard::{LeaderboardEntry, LeaderboardResponse, RankingParams},
    state::AppState,
    utils::jwt::Claims,
};

/// XP leaderboard over a selectable period.
///
/// Eligibility for day/week/month views is decided by answer activity in
/// the window. Per-entry accuracy comes from one batched store query over
/// the displayed ids plus the caller, never a per-row fan-out.
pub async fn leaderboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<RankingParams>,
) -> Result<impl IntoResponse, AppError> {
    let active_since = match params.period.as_deref().unwrap_or("all") {
        "all" => None,
        "day" => Some(Utc::now() - Duration::days(1)),
        "week" => Some(Utc::now() - Duration::weeks(1)),
        "month" => Some(Utc::now() - Duration::days(30)),
        other => {
            return Err(AppError::BadRequest(format!("Unknown period: {other}")));
        }
    };

    let limit = params
        .limit
        .unwrap_or(state.config.leaderboard_limit)
        .clamp(1, state.config.leaderboard_limit);

    let user_id = claims.user_id();
    let rows = state.store.list_users_by_xp(active_since).await?;
    let (ranked, me) = leaderboard::rank(rows, limit, user_id);

    let mut ids: Vec<i64> = ranked.iter().map(|r| r.user_id).collect();
    if me.is_some() && !ids.contains(&user_id) {
        ids.push(user_id);
    }
    let accuracy = state.store.accuracy_for_users(&ids).await?;

    let entries = ranked
        .into_iter()
        .map(|r| {
            let counts = accuracy.get(&r.user_id).copied().unwrap_or_default();
            LeaderboardEntry {
                rank: r.rank,
                user_id: r.user_id,
                name: r.name,
                xp: r.xp,
                accuracy: accuracy_pct(counts.correct, counts.total),
            }
        })
        .collect();

    Ok(Json(LeaderboardResponse { entries, me }))
}
