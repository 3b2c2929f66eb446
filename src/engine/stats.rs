// src/engine/stats.rs

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::engine::{accuracy_pct, streak};
use crate::models::answer::AnswerHistoryRow;
use crate::models::stats::{DailyAccuracy, FacetBreakdown, OverallSummary, WeakTopic};

/// Minimum answers a topic needs before it can appear in the weakness
/// ranking; smaller samples are too noisy to recommend review on.
pub const WEAKNESS_MIN_SAMPLE: u32 = 3;
/// How many weak topics the ranking reports.
pub const WEAKNESS_TOP_N: usize = 5;

#[derive(Default)]
struct Tally {
    label: String,
    total: u32,
    correct: u32,
}

/// Whole-history rollup: totals, accuracy, streak and distinct study days.
pub fn overall_summary(rows: &[AnswerHistoryRow], today: NaiveDate) -> OverallSummary {
    let total = rows.len() as u32;
    let correct = rows.iter().filter(|r| r.correct).count() as u32;
    let timestamps: Vec<_> = rows.iter().map(|r| r.answered_at).collect();
    let days = streak::study_days(&timestamps);

    OverallSummary {
        total_answered: total,
        total_correct: correct,
        total_incorrect: total - correct,
        accuracy: accuracy_pct(correct, total),
        current_streak: streak::current_streak(&days, today),
        study_days: days.len() as u32,
    }
}

/// Per-subject accuracy, sorted by answer volume descending (subject id
/// ascending on ties, so repeated queries agree on the order).
pub fn subject_breakdown(rows: &[AnswerHistoryRow]) -> Vec<FacetBreakdown> {
    breakdown(rows.iter().map(|r| (r.subject_id, r.subject_label.as_str(), r.correct)))
}

/// Per-topic accuracy scoped to one subject, same shape and ordering as
/// the subject breakdown.
pub fn topic_breakdown(rows: &[AnswerHistoryRow], subject_id: i64) -> Vec<FacetBreakdown> {
    breakdown(
        rows.iter()
            .filter(|r| r.subject_id == subject_id)
            .map(|r| (r.topic_id, r.topic_label.as_str(), r.correct)),
    )
}

fn breakdown<'a>(items: impl Iterator<Item = (i64, &'a str, bool)>) -> Vec<FacetBreakdown> {
    let mut tallies: HashMap<i64, Tally> = HashMap::new();
    for (id, label, correct) in items {
        let t = tallies.entry(id).or_default();
        if t.label.is_empty() {
            t.label = label.to_string();
        }
        t.total += 1;
        if correct {
            t.correct += 1;
        }
    }

    let mut out: Vec<FacetBreakdown> = tallies
        .into_iter()
        .map(|(id, t)| FacetBreakdown {
            id,
            label: t.label,
            total_answered: t.total,
            total_correct: t.correct,
            accuracy: accuracy_pct(t.correct, t.total),
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_answered
            .cmp(&a.total_answered)
            .then(a.id.cmp(&b.id))
    });
    out
}

/// Topics with at least `WEAKNESS_MIN_SAMPLE` answers, ranked by error
/// rate descending (volume descending, then topic id, on ties), truncated
/// to the top `WEAKNESS_TOP_N`.
pub fn weakest_topics(rows: &[AnswerHistoryRow]) -> Vec<WeakTopic> {
    let mut tallies: HashMap<i64, Tally> = HashMap::new();
    for r in rows {
        let t = tallies.entry(r.topic_id).or_default();
        if t.label.is_empty() {
            t.label = r.topic_label.clone();
        }
        t.total += 1;
        if r.correct {
            t.correct += 1;
        }
    }

    let mut out: Vec<WeakTopic> = tallies
        .into_iter()
        .filter(|(_, t)| t.total >= WEAKNESS_MIN_SAMPLE)
        .map(|(id, t)| {
            let incorrect = t.total - t.correct;
            WeakTopic {
                topic_id: id,
                topic_label: t.label,
                total_answered: t.total,
                total_incorrect: incorrect,
                error_rate: f64::from(incorrect) / f64::from(t.total),
            }
        })
        .filter(|w| w.total_incorrect > 0)
        .collect();

    out.sort_by(|a, b| {
        b.error_rate
            .partial_cmp(&a.error_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.total_answered.cmp(&a.total_answered))
            .then(a.topic_id.cmp(&b.topic_id))
    });
    out.truncate(WEAKNESS_TOP_N);
    out
}

/// Accuracy per calendar day over the trailing `window_days` ending at
/// `today`, oldest first. Inactive days are present with zeroed counts.
pub fn daily_accuracy(
    rows: &[AnswerHistoryRow],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyAccuracy> {
    let mut per_day: HashMap<NaiveDate, (u32, u32)> = HashMap::new();
    for r in rows {
        let e = per_day.entry(r.answered_at.date_naive()).or_default();
        e.0 += 1;
        if r.correct {
            e.1 += 1;
        }
    }

    let window = window_days.max(1);
    let start = today - Days::new(u64::from(window) - 1);
    (0..window)
        .filter_map(|offset| start.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| {
            let (total, correct) = per_day.get(&date).copied().unwrap_or((0, 0));
            DailyAccuracy {
                date,
                total_answered: total,
                total_correct: correct,
                accuracy: accuracy_pct(correct, total),
            }
        })
        .collect()
}
