//! Integration tests driving the tracker against the SQLite store.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use expansion_core::{
    Database, DayInput, DayRecord, DayTracker, HistoryStore, MicroNovelty, Mode, NoveltyKind,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn qualifying_day(d: &str) -> DayRecord {
    DayRecord {
        id: Uuid::new_v4(),
        date: date(d),
        mode: Mode::Building,
        environment: 0.5,
        business_focus: 5.0,
        training_focus: 1.0,
        micro_novelty: MicroNovelty::new(),
        macro_novelty: None,
        dopamine: 1.0,
        clearing: 1.0,
        score: 3.9,
        submitted: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_full_day_tracking_workflow() {
    let mut db = Database::open_memory().unwrap();
    for d in ["2025-03-09", "2025-03-08", "2025-03-07"] {
        db.upsert_day(&qualifying_day(d)).unwrap();
    }

    let today = date("2025-03-10");
    let mut tracker = DayTracker::open(db, today).unwrap();
    assert_eq!(tracker.draft(), &DayInput::default());

    let now = Utc::now();
    tracker.update(now, |draft| {
        draft.environment = 0.5;
        draft.business_focus = 4.0;
        draft.training_focus = 2.0;
        draft.micro_novelty.set_active(NoveltyKind::NewBook, true);
        draft.micro_novelty.set_active(NoveltyKind::NewPerson, true);
        draft.dopamine = 1.0;
        draft.clearing = 2.0;
    });

    // Three qualifying prior days feed the 1.3x multiplier.
    let before_save = tracker.evaluation();
    assert_eq!(before_save.streak, 3);
    assert_eq!(before_save.score, 7.8);

    let record = tracker.save(false, now).unwrap();
    assert_eq!(record.score, 7.8);
    assert_eq!(record.date, today);

    // Once today's row is in history it joins its own streak, so the next
    // evaluation reflects four qualifying days.
    let after_save = tracker.evaluation();
    assert_eq!(after_save.streak, 4);
    assert_eq!(after_save.score, 8.4);
}

#[test]
fn test_saved_days_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expansion.db");
    let today = date("2025-03-10");

    {
        let db = Database::open_at(&path).unwrap();
        let mut tracker = DayTracker::open(db, today).unwrap();
        tracker.update(Utc::now(), |draft| {
            draft.business_focus = 6.0;
            draft.micro_novelty.set_active(NoveltyKind::NewMethod, true);
            draft
                .micro_novelty
                .set_note(NoveltyKind::NewMethod, Some("Timeboxing".to_string()));
        });
        tracker.save(true, Utc::now()).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let tracker = DayTracker::open(db, today).unwrap();
    assert_eq!(tracker.draft().business_focus, 6.0);
    assert!(tracker.draft().submitted);
    assert_eq!(
        tracker.draft().micro_novelty.note(NoveltyKind::NewMethod),
        Some("Timeboxing")
    );
}

#[test]
fn test_streak_breaks_on_reference_day_dopamine() {
    let mut db = Database::open_memory().unwrap();
    for d in ["2025-03-09", "2025-03-08"] {
        db.upsert_day(&qualifying_day(d)).unwrap();
    }
    let mut bad_day = qualifying_day("2025-03-10");
    bad_day.dopamine = 4.5;
    bad_day.clearing = 0.0;
    db.upsert_day(&bad_day).unwrap();

    let tracker = DayTracker::open(db, date("2025-03-10")).unwrap();
    assert_eq!(tracker.evaluation().streak, 0);
}

#[test]
fn test_autosave_persists_draft_after_debounce() {
    let db = Database::open_memory().unwrap();
    let today = date("2025-03-10");
    let mut tracker = DayTracker::open(db, today).unwrap();

    let edited_at = Utc::now();
    tracker.update(edited_at, |draft| draft.business_focus = 3.0);

    assert!(!tracker
        .autosave_tick(edited_at + Duration::milliseconds(200))
        .unwrap());
    assert!(tracker
        .autosave_tick(edited_at + Duration::seconds(2))
        .unwrap());

    let saved = tracker.store().find_day(today).unwrap().unwrap();
    assert_eq!(saved.business_focus, 3.0);
    assert!(!saved.submitted);
}

#[test]
fn test_stagnation_surfaces_in_insight() {
    let mut db = Database::open_memory().unwrap();
    let start = date("2025-03-01");
    for i in 0..7 {
        let mut day = qualifying_day("2025-03-01");
        day.date = start + Duration::days(i);
        db.upsert_day(&day).unwrap();
    }

    let tracker = DayTracker::open(db, date("2025-03-08")).unwrap();
    let eval = tracker.evaluation();
    assert!(eval.stagnating);
    assert!(eval.insight.contains("Neural grooves"));
}
