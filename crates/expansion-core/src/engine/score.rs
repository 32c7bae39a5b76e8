//! Day score calculation.
//!
//! Two formulas, selected by [`Mode`]:
//!
//! ```text
//! Building:  environment × focus × (1 + novelty) × streak_multiplier / (1 + sludge)
//! Expanding: novelty × (focus + 1) / (1 + sludge)
//! ```
//!
//! Building novelty is the micro-novelty score (0 to 2.5) acting as a bonus
//! multiplier; focus is a hard gate, so a zero-focus Building day scores
//! exactly 0. Expanding novelty is the raw 1-10 macro rating, focus is only
//! additive, and the environment multiplier is pinned to 1.0 regardless of
//! what the field holds. Scores round to the nearest 0.1.
//!
//! Inputs are caller-validated; negative magnitudes are computed as-is.

use crate::day::{DayInput, Mode};

use super::sludge::net_sludge;

/// Streak bonus per qualifying day.
const STREAK_BONUS_PER_DAY: f64 = 0.1;

/// Ceiling on the streak multiplier.
const STREAK_MULTIPLIER_CAP: f64 = 1.5;

/// `min(1 + 0.1 × streak, 1.5)`.
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + STREAK_BONUS_PER_DAY * f64::from(streak)).min(STREAK_MULTIPLIER_CAP)
}

/// Score for a Building-mode day.
pub fn building_score(input: &DayInput, streak: u32) -> f64 {
    let focus = input.total_focus();
    let novelty = input.micro_novelty.score();
    let sludge = net_sludge(input.dopamine, input.clearing);

    let score =
        input.environment * focus * (1.0 + novelty) * streak_multiplier(streak) / (1.0 + sludge);
    round_tenth(score)
}

/// Score for an Expanding-mode day.
///
/// The stored environment value is not read; being out expanding is the
/// novel environment, so the multiplier is 1.0 by definition.
pub fn expanding_score(input: &DayInput) -> f64 {
    let environment = 1.0;
    let focus = input.total_focus();
    let novelty = f64::from(input.macro_novelty);
    let sludge = net_sludge(input.dopamine, input.clearing);

    let score = environment * novelty * (focus + 1.0) / (1.0 + sludge);
    round_tenth(score)
}

/// Score for a day under its own mode, given the streak supplied by the
/// streak tracker.
pub fn day_score(input: &DayInput, streak: u32) -> f64 {
    match input.mode {
        Mode::Building => building_score(input, streak),
        Mode::Expanding => expanding_score(input),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
