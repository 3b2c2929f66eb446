// src/engine/level.rs

/// XP thresholds and titles, in ascending order. A user's level is the
/// last tier whose threshold they have reached; levels are 1-based.
const TIERS: &[(i64, &str)] = &[
    (0, "Novice"),
    (100, "Apprentice"),
    (300, "Student"),
    (700, "Scholar"),
    (1500, "Specialist"),
    (3000, "Expert"),
    (6000, "Master"),
];

/// Step function of XP onto (level number, title).
pub fn level_for(xp: i64) -> (u32, &'static str) {
    let idx = TIERS
        .iter()
        .rposition(|(threshold, _)| xp >= *threshold)
        .unwrap_or(0);
    (idx as u32 + 1, TIERS[idx].1)
}
