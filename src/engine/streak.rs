// src/engine/streak.rs

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Collapses answer timestamps to their distinct UTC calendar days.
pub fn study_days(timestamps: &[DateTime<Utc>]) -> BTreeSet<NaiveDate> {
    timestamps.iter().map(|t| t.date_naive()).collect()
}

/// Length of the maximal run of consecutive study days ending at the most
/// recent one, anchored to `today`: once the latest study day is older
/// than yesterday the streak has lapsed and reports 0.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&latest) = days.iter().next_back() else {
        return 0;
    };

    let yesterday = today - Days::new(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = latest;
    while let Some(prev) = cursor.checked_sub_days(Days::new(1)) {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }
    streak
}
