//! History storage collaborator.
//!
//! The engine never talks to storage directly; whatever orchestrates it is
//! handed a [`HistoryStore`]. Implementations must key records uniquely by
//! date and return history most-recent-first.

use chrono::NaiveDate;

use crate::day::DayRecord;
use crate::error::CoreError;

/// Read/write access to one user's day records.
pub trait HistoryStore {
    /// The most recent `limit` records, sorted by date descending.
    fn load_recent(&self, limit: usize) -> Result<Vec<DayRecord>, CoreError>;

    /// The record for an exact date, if one exists.
    fn find_day(&self, date: NaiveDate) -> Result<Option<DayRecord>, CoreError>;

    /// Insert or replace the record for `record.date`.
    fn upsert_day(&mut self, record: &DayRecord) -> Result<(), CoreError>;
}

/// In-memory history, used by tests and as a scratch store.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    days: Vec<DayRecord>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records.
    pub fn with_days(mut days: Vec<DayRecord>) -> Self {
        days.sort_by(|a, b| b.date.cmp(&a.date));
        Self { days }
    }

    /// All records, most recent first.
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }
}

impl HistoryStore for MemoryHistory {
    fn load_recent(&self, limit: usize) -> Result<Vec<DayRecord>, CoreError> {
        Ok(self.days.iter().take(limit).cloned().collect())
    }

    fn find_day(&self, date: NaiveDate) -> Result<Option<DayRecord>, CoreError> {
        Ok(self.days.iter().find(|d| d.date == date).cloned())
    }

    fn upsert_day(&mut self, record: &DayRecord) -> Result<(), CoreError> {
        self.days.retain(|d| d.date != record.date);
        self.days.push(record.clone());
        self.days.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(())
    }
}
