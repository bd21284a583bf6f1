//! Cross-session statistics
//!
//! The persisted record only grows: counters merge in whole sessions at
//! game-over or quit, never mid-game, so a crash can't leave half a session
//! on disk.

use serde::{Deserialize, Serialize};

/// Per-session counters, folded into the persisted record at session end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTally {
    pub catches: u64,
    pub misses: u64,
}

/// Lifetime aggregates persisted as `statistics.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsRecord {
    pub games_played: u64,
    pub total_score: u64,
    pub total_catches: u64,
    pub total_misses: u64,
    pub total_time_seconds: u64,
    pub best_combo: u32,
}

impl StatisticsRecord {
    /// Merge one finished session. Every counter is non-decreasing.
    pub fn record_session(
        &mut self,
        final_score: i64,
        best_combo: u32,
        tally: &SessionTally,
        play_time_seconds: f32,
    ) {
        self.games_played += 1;
        self.total_score += final_score.max(0) as u64;
        self.total_catches += tally.catches;
        self.total_misses += tally.misses;
        self.total_time_seconds += play_time_seconds.max(0.0) as u64;
        self.best_combo = self.best_combo.max(best_combo);
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }

    /// Fraction of drops caught, as a percentage
    pub fn catch_rate(&self) -> f64 {
        let total = self.total_catches + self.total_misses;
        if total == 0 {
            0.0
        } else {
            self.total_catches as f64 / total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_session_increments_games_played_by_exactly_one() {
        let mut record = StatisticsRecord::default();
        let tally = SessionTally {
            catches: 12,
            misses: 3,
        };
        record.record_session(0, 5, &tally, 42.7);
        assert_eq!(record.games_played, 1);
        assert_eq!(record.total_catches, 12);
        assert_eq!(record.total_misses, 3);
        assert_eq!(record.total_time_seconds, 42);
        assert_eq!(record.best_combo, 5);
    }

    #[test]
    fn counters_never_decrease_across_sessions() {
        let mut record = StatisticsRecord::default();
        let mut prev = record.clone();
        for i in 0..10 {
            let tally = SessionTally {
                catches: i,
                misses: 10 - i,
            };
            record.record_session(i as i64 - 3, (i % 4) as u32, &tally, i as f32);
            assert!(record.games_played >= prev.games_played);
            assert!(record.total_score >= prev.total_score);
            assert!(record.total_catches >= prev.total_catches);
            assert!(record.total_misses >= prev.total_misses);
            assert!(record.total_time_seconds >= prev.total_time_seconds);
            assert!(record.best_combo >= prev.best_combo);
            prev = record.clone();
        }
    }

    #[test]
    fn negative_final_score_counts_as_zero() {
        let mut record = StatisticsRecord::default();
        record.record_session(-2, 0, &SessionTally::default(), 1.0);
        assert_eq!(record.total_score, 0);
    }

    #[test]
    fn derived_rates_handle_empty_records() {
        let record = StatisticsRecord::default();
        assert_eq!(record.average_score(), 0.0);
        assert_eq!(record.catch_rate(), 0.0);

        let mut record = StatisticsRecord::default();
        record.record_session(
            20,
            3,
            &SessionTally {
                catches: 3,
                misses: 1,
            },
            10.0,
        );
        assert_eq!(record.average_score(), 20.0);
        assert_eq!(record.catch_rate(), 75.0);
    }

    #[test]
    fn partial_json_loads_with_defaults() {
        let record: StatisticsRecord =
            serde_json::from_str(r#"{"games_played": 4}"#).expect("partial record should parse");
        assert_eq!(record.games_played, 4);
        assert_eq!(record.total_catches, 0);
    }
}
