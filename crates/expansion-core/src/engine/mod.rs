//! Day scoring engine.
//!
//! Four pure components over immutable snapshots: the sludge calculator,
//! the score calculator, the streak tracker, and the stagnation detector,
//! with the insight generator selecting a message from their outputs. No
//! component performs I/O or holds state between calls; [`evaluate`] wires
//! them together for one day and is safe to call on every input change.

pub mod insight;
pub mod score;
pub mod sludge;
pub mod stagnation;
pub mod streak;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::{DayInput, DayRecord};

/// Everything the engine derives for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEvaluation {
    /// Day score, one decimal place
    pub score: f64,
    /// Consecutive qualifying days ending at the evaluated date
    pub streak: u32,
    /// Whether the trailing week shows the stagnation pattern
    pub stagnating: bool,
    /// Selected insight message
    pub insight: String,
}

/// Evaluate a draft against a history snapshot for the given date.
///
/// `history` is the caller's snapshot (normally the last ~90 days); it is
/// only read. The draft's own saved record, if present in `history`,
/// participates in the streak walk.
pub fn evaluate(input: &DayInput, history: &[DayRecord], date: NaiveDate) -> DayEvaluation {
    let streak = streak::streak_ending_at(history, date);
    let score = score::day_score(input, streak);
    let stagnating = stagnation::detect_stagnation(history);
    let insight = insight::insight_for_day(input, score, streak, stagnating);

    DayEvaluation {
        score,
        streak,
        stagnating,
        insight,
    }
}
