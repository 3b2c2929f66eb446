// src/handlers/practice.rs

use std::collections::HashMap;

use axum::{Extension, Json, extract::{Query, State}, response::IntoResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
    engine::filter::{self, AnsweredStatus, FilterSpec},
    error::AppError,
    models::{
        answer::{NewAnswer, SubmitAnswerRequest, SubmitAnswerResponse},
        question::{OptionKey, PublicQuestion, QuestionListParams},
    },
    state::AppState,
    utils::jwt::Claims,
};

fn parse_filter(params: QuestionListParams) -> Result<FilterSpec, AppError> {
    let years = match params.years.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(|y| {
                y.trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid year: {y}")))
            })
            .collect::<Result<Vec<i32>, AppError>>()?,
    };

    let status = match params.status.as_deref() {
        None => AnsweredStatus::Any,
        Some(s) => AnsweredStatus::parse(s)?,
    };

    Ok(FilterSpec {
        search: params.search,
        subject_id: params.subject_id,
        topic_id: params.topic_id,
        board_id: params.board_id,
        agency_id: params.agency_id,
        education_level_id: params.education_level_id,
        years,
        status,
    })
}

/// Lists the caller's working set: the active corpus reduced by the facet
/// selection, free-text search and answered-status predicate.
///
/// Corpus and answer state are fetched once and the whole filter pass runs
/// in memory, so re-running it is a pure function of the same snapshot.
pub async fn list_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<QuestionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let spec = parse_filter(params)?;
    let user_id = claims.user_id();

    let corpus = state.store.list_active_questions().await?;
    let history = state.store.answer_history(user_id).await?;
    let answered: HashMap<i64, bool> = history
        .iter()
        .map(|r| (r.question_id, r.correct))
        .collect();

    let results: Vec<PublicQuestion> = filter::apply(&corpus, &answered, &spec)
        .into_iter()
        .map(|q| PublicQuestion::from_question(q, answered.get(&q.id).copied()))
        .collect();

    Ok(Json(results))
}

/// Records one answer attempt.
///
/// * Validates the question exists, is active, and the option key is one
///   of its valid keys - all before any side effect.
/// * Correctness is computed against the stored key, never trusted from
///   the client.
/// * The answer row and the XP/progress increments land in a single store
///   transaction; a duplicate (user, question) pair yields 409 Conflict.
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let user_id = claims.user_id();

    let question = state
        .store
        .get_question(req.question_id)
        .await?
        .filter(|q| q.active)
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let selected = OptionKey::parse(&req.selected_option).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid option key: {}", req.selected_option))
    })?;
    if selected.index() >= question.options.len() {
        return Err(AppError::BadRequest(format!(
            "Option {} does not exist on this question",
            selected.as_str()
        )));
    }

    let correct = selected.as_str() == question.correct_option;
    let xp_awarded = if correct {
        state.config.xp_correct
    } else {
        state.config.xp_incorrect
    };

    let answer = NewAnswer {
        user_id,
        question_id: question.id,
        selected_option: selected.as_str().to_string(),
        correct,
        answered_at: Utc::now(),
    };
    state.store.record_answer(&answer, xp_awarded).await?;

    tracing::debug!(user_id, question_id = question.id, correct, "answer recorded");

    Ok(Json(SubmitAnswerResponse {
        correct,
        correct_option: question.correct_option,
        explanation: question.explanation,
        xp_awarded,
    }))
}
