//! Day tracking orchestration.
//!
//! [`DayTracker`] is the stateful shell around the pure engine: it loads a
//! history window from an injected [`HistoryStore`], keeps the editable draft
//! for the selected date, re-evaluates on demand, and persists drafts either
//! explicitly or through debounced autosave. All clocks are supplied by the
//! caller; the tracker never reads wall time itself.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::autosave::AutosavePolicy;
use crate::day::{DayInput, DayRecord, Mode};
use crate::engine::{self, DayEvaluation};
use crate::error::CoreError;
use crate::history::HistoryStore;
use crate::storage::TrackerConfig;

/// Stateful tracker for one user's days.
pub struct DayTracker<S> {
    store: S,
    history: Vec<DayRecord>,
    selected: NaiveDate,
    draft: DayInput,
    default_draft: DayInput,
    autosave: AutosavePolicy,
    dirty: bool,
    last_edit: Option<DateTime<Utc>>,
}

impl<S: HistoryStore> DayTracker<S> {
    /// Open a tracker on `today` with default configuration.
    pub fn open(store: S, today: NaiveDate) -> Result<Self, CoreError> {
        Self::with_config(store, today, &TrackerConfig::default())
    }

    /// Open a tracker on `today`, loading the configured history window and
    /// rehydrating today's draft if a record exists.
    pub fn with_config(store: S, today: NaiveDate, config: &TrackerConfig) -> Result<Self, CoreError> {
        let history = store.load_recent(config.history_window)?;
        let default_draft = config.default_draft();
        let draft = history
            .iter()
            .find(|d| d.date == today)
            .map(DayInput::from_record)
            .unwrap_or_else(|| default_draft.clone());

        Ok(Self {
            store,
            history,
            selected: today,
            draft,
            default_draft,
            autosave: AutosavePolicy::new(config.autosave_debounce_ms),
            dirty: false,
            last_edit: None,
        })
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    pub fn draft(&self) -> &DayInput {
        &self.draft
    }

    /// The loaded history snapshot, most recent first.
    pub fn history(&self) -> &[DayRecord] {
        &self.history
    }

    /// Whether the draft has unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switch to another date, loading its record into the draft or starting
    /// a fresh one. Loading never arms autosave.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        self.draft = self
            .history
            .iter()
            .find(|d| d.date == date)
            .map(DayInput::from_record)
            .unwrap_or_else(|| self.default_draft.clone());
        self.dirty = false;
        self.last_edit = None;
    }

    /// Apply an edit to the draft and arm autosave.
    pub fn update<F>(&mut self, now: DateTime<Utc>, edit: F)
    where
        F: FnOnce(&mut DayInput),
    {
        edit(&mut self.draft);
        self.dirty = true;
        self.last_edit = Some(now);
    }

    /// Evaluate the current draft against the loaded history.
    pub fn evaluation(&self) -> DayEvaluation {
        engine::evaluate(&self.draft, &self.history, self.selected)
    }

    /// Persist the draft for the selected date, recomputing the score.
    ///
    /// An existing row keeps its id and creation timestamp. The local history
    /// mirror is updated in place rather than refetched, so the next
    /// evaluation sees the saved day immediately.
    pub fn save(&mut self, submit: bool, now: DateTime<Utc>) -> Result<DayRecord, CoreError> {
        let evaluation = self.evaluation();
        let existing = self.history.iter().find(|d| d.date == self.selected);

        let record = DayRecord {
            id: existing.map(|d| d.id).unwrap_or_else(Uuid::new_v4),
            date: self.selected,
            mode: self.draft.mode,
            environment: self.draft.environment,
            business_focus: self.draft.business_focus,
            training_focus: self.draft.training_focus,
            micro_novelty: self.draft.micro_novelty.clone(),
            macro_novelty: match self.draft.mode {
                Mode::Expanding => Some(self.draft.macro_novelty),
                Mode::Building => None,
            },
            dopamine: self.draft.dopamine,
            clearing: self.draft.clearing,
            score: evaluation.score,
            submitted: submit,
            created_at: existing.map(|d| d.created_at).unwrap_or(now),
            updated_at: now,
        };

        self.store.upsert_day(&record)?;

        self.history.retain(|d| d.date != self.selected);
        self.history.push(record.clone());
        self.history.sort_by(|a, b| b.date.cmp(&a.date));

        if submit {
            self.draft.submitted = true;
        }
        self.dirty = false;
        self.last_edit = None;

        Ok(record)
    }

    /// Flush a pending draft if the debounce window has passed.
    ///
    /// Returns whether a save happened. Submitted days are never autosaved.
    pub fn autosave_tick(&mut self, now: DateTime<Utc>) -> Result<bool, CoreError> {
        if !self.dirty || self.draft.submitted {
            return Ok(false);
        }
        if !self.autosave.should_flush(self.last_edit, now) {
            return Ok(false);
        }

        self.save(false, now)?;
        Ok(true)
    }
}
