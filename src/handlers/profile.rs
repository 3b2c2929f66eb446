// src/handlers/profile.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;

use crate::{
    engine::{level, stats},
    error::AppError,
    models::progress::ProfileResponse,
    state::AppState,
    utils::jwt::Claims,
};

/// Current user's progress and derived standing. Reuses the same
/// aggregation functions as the statistics endpoints, so the numbers on
/// the profile and the dashboard never diverge.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();

    let progress = state.store.get_progress(user_id).await?;
    let history = state.store.answer_history(user_id).await?;
    let summary = stats::overall_summary(&history, Utc::now().date_naive());
    let (level, title) = level::level_for(progress.xp);

    Ok(Json(ProfileResponse {
        user_id,
        xp: progress.xp,
        questions_answered: progress.questions_answered,
        level,
        title: title.to_string(),
        current_streak: summary.current_streak,
        study_days: summary.study_days,
        accuracy: summary.accuracy,
    }))
}
