//! Stagnation detection over the trailing week.
//!
//! Flags a 7-day run of Building-mode days in which none of the book, person,
//! or method signals fired. Place and challenge signals do not reset the
//! window. Fewer than 7 records is never stagnation.

use crate::day::{DayRecord, Mode, NoveltyKind};

/// Number of trailing records the detector inspects.
const WINDOW: usize = 7;

/// True when the 7 most recent days are all Building with no book, person,
/// or method novelty.
pub fn detect_stagnation(history: &[DayRecord]) -> bool {
    let mut recent: Vec<&DayRecord> = history.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(WINDOW);

    if recent.len() < WINDOW {
        return false;
    }

    let all_building = recent.iter().all(|d| d.mode == Mode::Building);
    let no_novelty = recent.iter().all(|d| {
        !d.micro_novelty.is_active(NoveltyKind::NewBook)
            && !d.micro_novelty.is_active(NoveltyKind::NewPerson)
            && !d.micro_novelty.is_active(NoveltyKind::NewMethod)
    });

    all_building && no_novelty
}
