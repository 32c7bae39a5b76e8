//! History summary statistics.
//!
//! Aggregates one user's history snapshot into the numbers the stats panel
//! shows: per-mode day counts and averages, submission totals, and the
//! current streak. The streak reuses the engine's streak tracker anchored at
//! the newest record date, so the tracker and the stats panel always agree.

use serde::{Deserialize, Serialize};

use crate::day::{DayRecord, Mode};
use crate::engine::streak;

/// Aggregate statistics over a history snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Total records in the snapshot
    pub total_days: usize,
    /// Records finalized with submit
    pub submitted_days: usize,
    /// Building-mode day count
    pub building_days: usize,
    /// Expanding-mode day count
    pub expanding_days: usize,
    /// Mean total focus hours across Building days
    pub avg_building_focus: f64,
    /// Mean score across Building days
    pub avg_building_score: f64,
    /// Mean macro novelty across Expanding days
    pub avg_expanding_novelty: f64,
    /// Mean score across Expanding days
    pub avg_expanding_score: f64,
    /// Consecutive qualifying days ending at the newest record
    pub current_streak: u32,
}

impl HistorySummary {
    /// Summarize a history snapshot. Empty mode buckets average to 0.
    pub fn from_history(history: &[DayRecord]) -> Self {
        let building: Vec<&DayRecord> =
            history.iter().filter(|d| d.mode == Mode::Building).collect();
        let expanding: Vec<&DayRecord> =
            history.iter().filter(|d| d.mode == Mode::Expanding).collect();

        let avg_building_focus = mean(building.iter().map(|d| d.total_focus()));
        let avg_building_score = mean(building.iter().map(|d| d.score));
        let avg_expanding_novelty =
            mean(expanding.iter().map(|d| f64::from(d.macro_novelty.unwrap_or(0))));
        let avg_expanding_score = mean(expanding.iter().map(|d| d.score));

        let current_streak = history
            .iter()
            .map(|d| d.date)
            .max()
            .map(|latest| streak::streak_ending_at(history, latest))
            .unwrap_or(0);

        Self {
            total_days: history.len(),
            submitted_days: history.iter().filter(|d| d.submitted).count(),
            building_days: building.len(),
            expanding_days: expanding.len(),
            avg_building_focus,
            avg_building_score,
            avg_expanding_novelty,
            avg_expanding_score,
            current_streak,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::MicroNovelty;
    use chrono::Utc;
    use uuid::Uuid;

    fn day(date: &str, mode: Mode, business_focus: f64, score: f64, submitted: bool) -> DayRecord {
        DayRecord {
            id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            mode,
            environment: 0.5,
            business_focus,
            training_focus: 0.0,
            micro_novelty: MicroNovelty::new(),
            macro_novelty: match mode {
                Mode::Building => None,
                Mode::Expanding => Some(8),
            },
            dopamine: 0.0,
            clearing: 0.0,
            score,
            submitted,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_history_summary_is_all_zeroes() {
        let summary = HistorySummary::from_history(&[]);
        assert_eq!(summary, HistorySummary::default());
    }

    #[test]
    fn test_per_mode_buckets_and_averages() {
        let history = vec![
            day("2025-03-10", Mode::Building, 5.0, 10.0, true),
            day("2025-03-09", Mode::Building, 7.0, 20.0, true),
            day("2025-03-08", Mode::Expanding, 1.0, 6.4, false),
        ];

        let summary = HistorySummary::from_history(&history);
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.submitted_days, 2);
        assert_eq!(summary.building_days, 2);
        assert_eq!(summary.expanding_days, 1);
        assert_eq!(summary.avg_building_focus, 6.0);
        assert_eq!(summary.avg_building_score, 15.0);
        assert_eq!(summary.avg_expanding_novelty, 8.0);
        assert_eq!(summary.avg_expanding_score, 6.4);
    }

    #[test]
    fn test_current_streak_is_anchored_at_newest_record() {
        // Two qualifying days ending at 03-10; the expanding day before them
        // has too little focus to qualify.
        let history = vec![
            day("2025-03-10", Mode::Building, 5.0, 10.0, true),
            day("2025-03-09", Mode::Building, 6.0, 12.0, true),
            day("2025-03-08", Mode::Expanding, 1.0, 6.4, true),
        ];

        let summary = HistorySummary::from_history(&history);
        assert_eq!(summary.current_streak, 2);
    }
}
