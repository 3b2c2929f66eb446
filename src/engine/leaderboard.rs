// src/engine/leaderboard.rs

use crate::models::leaderboard::{MyPosition, XpRow};

/// A ranked row before accuracy is attached by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRow {
    pub rank: usize,
    pub user_id: i64,
    pub name: String,
    pub xp: i64,
}

/// Sorts eligible users by XP descending with user id ascending as the
/// tie-break, assigns contiguous 1-based ranks, truncates to `limit`, and
/// reports the caller's own rank even when it falls outside the cut.
pub fn rank(
    mut rows: Vec<XpRow>,
    limit: usize,
    current_user: i64,
) -> (Vec<RankedRow>, Option<MyPosition>) {
    rows.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.user_id.cmp(&b.user_id)));

    let me = rows
        .iter()
        .position(|r| r.user_id == current_user)
        .map(|idx| MyPosition {
            rank: idx + 1,
            xp: rows[idx].xp,
        });

    let ranked = rows
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, r)| RankedRow {
            rank: idx + 1,
            user_id: r.user_id,
            name: r.name,
            xp: r.xp,
        })
        .collect();

    (ranked, me)
}
