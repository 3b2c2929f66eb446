// src/engine/mod.rs
//
// Pure, I/O-free practice analytics: the handlers fetch rows once through
// the store and everything here is a deterministic function of them.

pub mod filter;
pub mod leaderboard;
pub mod level;
pub mod stats;
pub mod streak;

/// Accuracy percentage in [0, 100]. Zero total yields 0, never NaN.
pub fn accuracy_pct(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::accuracy_pct;

    #[test]
    fn accuracy_is_bounded_and_zero_safe() {
        assert_eq!(accuracy_pct(0, 0), 0.0);
        assert_eq!(accuracy_pct(0, 7), 0.0);
        assert_eq!(accuracy_pct(7, 7), 100.0);
        assert_eq!(accuracy_pct(1, 4), 25.0);
        assert!(accuracy_pct(3, 9) > 0.0 && accuracy_pct(3, 9) < 100.0);
    }
}
