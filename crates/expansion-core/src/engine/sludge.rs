//! Net sludge penalty.
//!
//! Sludge is the friction left over after recovery activity partially offsets
//! low-effort stimulation. Clearing cancels dopamine at half weight, and the
//! result never goes negative.

/// Fraction of a dopamine unit cancelled by one clearing unit.
pub const CLEARING_WEIGHT: f64 = 0.5;

/// `max(0, dopamine - 0.5 * clearing)`.
pub fn net_sludge(dopamine: f64, clearing: f64) -> f64 {
    (dopamine - clearing * CLEARING_WEIGHT).max(0.0)
}
