//! Pattern-based insight selection.
//!
//! An ordered decision table over the already-computed score, streak, and
//! stagnation flag plus the raw day input. The first matching rule wins:
//! stagnation, then critical environment, then uncleared sludge, then the
//! mode-specific wins, then general score tiers.

use crate::day::{DayInput, Mode};

use super::score::streak_multiplier;

/// Building streak length that earns the momentum message.
const MOMENTUM_STREAK: u32 = 7;

/// Select the insight message for a day.
pub fn insight_for_day(input: &DayInput, score: f64, streak: u32, stagnating: bool) -> String {
    let total_focus = input.total_focus();
    let sludge_gap = input.dopamine - input.clearing;
    let micro_score = input.micro_novelty.score();

    if stagnating {
        return "⚠️ Neural grooves are deep after 7 days. One pattern break—new place, new person, new method—resets the clock.".to_string();
    }

    // Checked in both modes even though the multiplier only applies to
    // Building scores.
    if (input.environment - 0.1).abs() < f64::EPSILON {
        return "🚨 The Room is a trap. Your multiplier is 0.1x. Get to a Third Space and watch your score jump 10x.".to_string();
    }

    if sludge_gap > 2.0 {
        return "⚠️ Sludge is dragging you down. One clearing session (walk, workout, breathwork) neutralizes the penalty.".to_string();
    }

    match input.mode {
        Mode::Building => {
            if streak >= MOMENTUM_STREAK {
                return format!(
                    "🔥 {streak}-day execution streak! Streak multiplier at {:.1}x. You're compounding into someone unstoppable.",
                    streak_multiplier(streak)
                );
            }
            if total_focus >= 6.0 && micro_score >= 1.0 {
                return "⚡ High execution + neural novelty = perfect Building day. This is how you grow without stagnating.".to_string();
            }
            if total_focus >= 6.0 && micro_score == 0.0 {
                return "💪 Strong execution. Add one micro-novelty tomorrow (new book, conversation, or method) to keep the neural pathways fresh.".to_string();
            }
            if total_focus > 4.0 {
                return "🔨 Solid Building day. Keep stacking—your streak multiplier grows with consistency.".to_string();
            }
        }
        Mode::Expanding => {
            if input.macro_novelty >= 9 {
                return "🌍 Maximum expansion! Days like this create lifetime memories. Now capture the lessons.".to_string();
            }
            if input.macro_novelty >= 7 && total_focus >= 2.0 {
                return "🚀 High novelty + solid focus = the sweet spot. You're expanding AND building.".to_string();
            }
            if input.macro_novelty >= 7 && total_focus < 1.0 {
                return "🗺️ Great exploration! Tomorrow, channel these new inputs into focused execution.".to_string();
            }
        }
    }

    if score >= 50.0 {
        return "🏆 Exceptional day. Top-tier performance in either mode.".to_string();
    }
    if score >= 30.0 {
        return "📈 Strong progress. You're moving the needle.".to_string();
    }
    if score >= 15.0 {
        return "🌱 Building momentum. Every logged day compounds.".to_string();
    }

    "🎯 Day logged. Pick one variable to push higher tomorrow.".to_string()
}
