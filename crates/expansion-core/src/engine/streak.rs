//! Consecutive-day streak tracking.
//!
//! Walks history backward from a reference date and counts qualifying days.
//! A day qualifies when total focus exceeds 4 hours, dopamine stays under the
//! 4-unit ceiling, and net sludge is at most 2. The walk stops at the first
//! disqualifying day or at the first calendar gap of more than one day; a bad
//! day in the middle of an otherwise good run truncates the streak there.
//!
//! The reference date's own record is part of the scan and can break the
//! streak to 0 on its own. Future-dated records are ignored.

use chrono::NaiveDate;

use crate::day::DayRecord;

use super::sludge::net_sludge;

/// A day must log strictly more than this many focus hours to qualify.
const MIN_QUALIFYING_FOCUS: f64 = 4.0;

/// Dopamine at or above this breaks the streak regardless of clearing.
const DOPAMINE_CEILING: f64 = 4.0;

/// Net sludge above this breaks the streak.
const MAX_NET_SLUDGE: f64 = 2.0;

/// Count consecutive qualifying days ending at `reference`.
///
/// History may arrive unordered and may contain future-dated anomalies; both
/// are tolerated. Gaps are treated as streak terminators, never as errors.
pub fn streak_ending_at(history: &[DayRecord], reference: NaiveDate) -> u32 {
    if history.is_empty() {
        return 0;
    }

    let mut days: Vec<&DayRecord> = history.iter().filter(|d| d.date <= reference).collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    let mut expected = reference;

    for day in days {
        let gap_days = (expected - day.date).num_days();
        if gap_days > 1 {
            break;
        }
        if day.total_focus() <= MIN_QUALIFYING_FOCUS {
            break;
        }
        if day.dopamine >= DOPAMINE_CEILING {
            break;
        }
        if net_sludge(day.dopamine, day.clearing) > MAX_NET_SLUDGE {
            break;
        }

        streak += 1;
        expected = day.date;
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{MicroNovelty, Mode};
    use chrono::Utc;
    use uuid::Uuid;

    fn day(date: &str, business_focus: f64, dopamine: f64, clearing: f64) -> DayRecord {
        DayRecord {
            id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            mode: Mode::Building,
            environment: 0.5,
            business_focus,
            training_focus: 0.0,
            micro_novelty: MicroNovelty::new(),
            macro_novelty: None,
            dopamine,
            clearing,
            score: 0.0,
            submitted: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(streak_ending_at(&[], date("2025-03-10")), 0);
    }

    #[test]
    fn test_counts_contiguous_qualifying_days() {
        let history = vec![
            day("2025-03-10", 5.0, 1.0, 0.0),
            day("2025-03-09", 6.0, 0.0, 0.0),
            day("2025-03-08", 4.5, 2.0, 1.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 3);
    }

    #[test]
    fn test_unordered_history_is_sorted_first() {
        let history = vec![
            day("2025-03-08", 4.5, 0.0, 0.0),
            day("2025-03-10", 5.0, 0.0, 0.0),
            day("2025-03-09", 6.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 3);
    }

    #[test]
    fn test_stops_at_calendar_gap() {
        let history = vec![
            day("2025-03-10", 5.0, 0.0, 0.0),
            day("2025-03-09", 6.0, 0.0, 0.0),
            // 2025-03-08 missing
            day("2025-03-07", 8.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 2);
    }

    #[test]
    fn test_low_focus_day_truncates_run() {
        let history = vec![
            day("2025-03-10", 5.0, 0.0, 0.0),
            day("2025-03-09", 4.0, 0.0, 0.0), // exactly 4h does not qualify
            day("2025-03-08", 9.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 1);
    }

    #[test]
    fn test_dopamine_ceiling_breaks_streak_despite_clearing() {
        // Reference day at 4.5 dopamine: no amount of clearing rescues it.
        let history = vec![
            day("2025-03-10", 6.0, 4.5, 20.0),
            day("2025-03-09", 6.0, 0.0, 0.0),
            day("2025-03-08", 6.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 0);
    }

    #[test]
    fn test_net_sludge_over_two_breaks_streak() {
        let history = vec![
            day("2025-03-10", 6.0, 3.0, 1.0), // net sludge 2.5
            day("2025-03-09", 6.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 0);
    }

    #[test]
    fn test_cleared_sludge_keeps_streak_alive() {
        // 3.5 dopamine is under the ceiling and clears down to 1.5.
        let history = vec![day("2025-03-10", 6.0, 3.5, 4.0)];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 1);
    }

    #[test]
    fn test_future_records_are_ignored() {
        let history = vec![
            day("2025-03-12", 8.0, 0.0, 0.0),
            day("2025-03-10", 5.0, 0.0, 0.0),
            day("2025-03-09", 5.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 2);
    }

    #[test]
    fn test_streak_without_record_on_reference_date() {
        // Yesterday's run still counts when today has no record yet.
        let history = vec![
            day("2025-03-09", 5.0, 0.0, 0.0),
            day("2025-03-08", 5.0, 0.0, 0.0),
        ];
        assert_eq!(streak_ending_at(&history, date("2025-03-10")), 2);
    }
}
