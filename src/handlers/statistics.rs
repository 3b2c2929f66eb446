// src/handlers/statistics.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    engine::stats,
    error::AppError,
    models::stats::DailySeriesParams,
    state::AppState,
    utils::jwt::Claims,
};

/// Overall totals, accuracy, streak and study-day count.
pub async fn summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.store.answer_history(claims.user_id()).await?;
    Ok(Json(stats::overall_summary(&history, Utc::now().date_naive())))
}

/// Per-subject accuracy breakdown, highest volume first.
pub async fn by_subject(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.store.answer_history(claims.user_id()).await?;
    Ok(Json(stats::subject_breakdown(&history)))
}

/// Per-topic accuracy breakdown within one subject.
pub async fn by_topic(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.store.answer_history(claims.user_id()).await?;
    Ok(Json(stats::topic_breakdown(&history, subject_id)))
}

/// Topics the user should review: highest error rate over a minimum
/// sample, top five.
pub async fn weaknesses(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.store.answer_history(claims.user_id()).await?;
    Ok(Json(stats::weakest_topics(&history)))
}

/// Daily accuracy series over a trailing window, zero-filled so charts
/// get a contiguous axis.
pub async fn daily(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<DailySeriesParams>,
) -> Result<impl IntoResponse, AppError> {
    let days = params
        .days
        .unwrap_or(state.config.daily_series_days)
        .clamp(1, 365);
    let history = state.store.answer_history(claims.user_id()).await?;
    Ok(Json(stats::daily_accuracy(
        &history,
        Utc::now().date_naive(),
        days,
    )))
}
