// src/engine/filter.rs

use std::collections::HashMap;

use crate::error::AppError;
use crate::models::question::Question;

/// Predicate on the caller's answered status for a question, evaluated
/// against an answered map captured once at filter time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnsweredStatus {
    #[default]
    Any,
    Unanswered,
    Correct,
    Incorrect,
}

impl AnsweredStatus {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "any" => Ok(AnsweredStatus::Any),
            "unanswered" => Ok(AnsweredStatus::Unanswered),
            "correct" => Ok(AnsweredStatus::Correct),
            "incorrect" => Ok(AnsweredStatus::Incorrect),
            other => Err(AppError::BadRequest(format!(
                "Unknown status filter: {other}"
            ))),
        }
    }
}

/// A fully parsed filter specification. Empty selectors mean "no
/// constraint on that dimension"; years are OR-ed, everything else AND-ed.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub search: Option<String>,
    pub subject_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub board_id: Option<i64>,
    pub agency_id: Option<i64>,
    pub education_level_id: Option<i64>,
    pub years: Vec<i32>,
    pub status: AnsweredStatus,
}

/// Applies the filter spec to an already-fetched corpus. Pure: the
/// answered map is the caller's answer state captured once at filter
/// time, keyed by question id with the recorded correctness.
///
/// Returns references in stable newest-first order (id descending stands
/// in for creation order).
pub fn apply<'a>(
    corpus: &'a [Question],
    answered: &HashMap<i64, bool>,
    spec: &FilterSpec,
) -> Vec<&'a Question> {
    let needle = spec
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<&Question> = corpus
        .iter()
        .filter(|q| q.active)
        .filter(|q| matches_facets(q, spec))
        .filter(|q| matches_status(q.id, answered, spec.status))
        .filter(|q| match &needle {
            None => true,
            Some(n) => matches_text(q, n),
        })
        .collect();

    out.sort_by(|a, b| b.id.cmp(&a.id));
    out
}

fn matches_facets(q: &Question, spec: &FilterSpec) -> bool {
    // Topic is an independent predicate: it is not required to belong to
    // the selected subject. The catalog pre-filters topic choices for the
    // UI, but consistency there is the caller's job.
    spec.subject_id.is_none_or(|id| q.subject_id == id)
        && spec.topic_id.is_none_or(|id| q.topic_id == id)
        && spec.board_id.is_none_or(|id| q.board_id == id)
        && spec.agency_id.is_none_or(|id| q.agency_id == id)
        && spec
            .education_level_id
            .is_none_or(|id| q.education_level_id == id)
        && (spec.years.is_empty() || spec.years.contains(&q.year))
}

fn matches_status(
    question_id: i64,
    answered: &HashMap<i64, bool>,
    status: AnsweredStatus,
) -> bool {
    match status {
        AnsweredStatus::Any => true,
        AnsweredStatus::Unanswered => !answered.contains_key(&question_id),
        AnsweredStatus::Correct => answered.get(&question_id) == Some(&true),
        AnsweredStatus::Incorrect => answered.get(&question_id) == Some(&false),
    }
}

fn matches_text(q: &Question, needle: &str) -> bool {
    q.statement.to_lowercase().contains(needle)
        || q.subject_label.to_lowercase().contains(needle)
        || q.topic_label.to_lowercase().contains(needle)
}
