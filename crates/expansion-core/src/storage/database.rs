//! SQLite-based day storage.
//!
//! One row per calendar date in a `days` table; the micro-novelty signal list
//! is stored as a JSON column. Implements [`HistoryStore`] so the tracker can
//! run against it directly.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

use super::data_dir;
use crate::day::{DayRecord, MicroNovelty, Mode};
use crate::error::{CoreError, DatabaseError};
use crate::history::HistoryStore;

const DAY_COLUMNS: &str = "date, id, mode, environment, business_focus, training_focus, \
                           micro_novelty, macro_novelty, dopamine, clearing, score, \
                           submitted, created_at, updated_at";

/// SQLite database for day records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/expansion/expansion.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let dir = data_dir().map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Self::open_at(&dir.join("expansion.db"))
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS days (
                    date            TEXT PRIMARY KEY,
                    id              TEXT NOT NULL,
                    mode            TEXT NOT NULL,
                    environment     REAL NOT NULL,
                    business_focus  REAL NOT NULL DEFAULT 0,
                    training_focus  REAL NOT NULL DEFAULT 0,
                    micro_novelty   TEXT NOT NULL,
                    macro_novelty   INTEGER,
                    dopamine        REAL NOT NULL DEFAULT 0,
                    clearing        REAL NOT NULL DEFAULT 0,
                    score           REAL NOT NULL DEFAULT 0,
                    submitted       INTEGER NOT NULL DEFAULT 0,
                    created_at      TEXT NOT NULL,
                    updated_at      TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert or replace the row for `record.date`.
    ///
    /// On replace, the row keeps its original id and creation timestamp.
    pub fn upsert(&self, record: &DayRecord) -> Result<(), DatabaseError> {
        let micro = serde_json::to_string(&record.micro_novelty)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        self.conn.execute(
            "INSERT INTO days (date, id, mode, environment, business_focus, training_focus,
                               micro_novelty, macro_novelty, dopamine, clearing, score,
                               submitted, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
             ON CONFLICT(date) DO UPDATE SET
                 mode = excluded.mode,
                 environment = excluded.environment,
                 business_focus = excluded.business_focus,
                 training_focus = excluded.training_focus,
                 micro_novelty = excluded.micro_novelty,
                 macro_novelty = excluded.macro_novelty,
                 dopamine = excluded.dopamine,
                 clearing = excluded.clearing,
                 score = excluded.score,
                 submitted = excluded.submitted,
                 updated_at = excluded.updated_at",
            params![
                record.date.to_string(),
                record.id.to_string(),
                record.mode.as_str(),
                record.environment,
                record.business_focus,
                record.training_focus,
                micro,
                record.macro_novelty,
                record.dopamine,
                record.clearing,
                record.score,
                record.submitted,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// The most recent `limit` days, newest first.
    pub fn recent_days(&self, limit: usize) -> Result<Vec<DayRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DAY_COLUMNS} FROM days ORDER BY date DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit as i64], Self::raw_row)?;

        let mut days = Vec::new();
        for row in rows {
            days.push(decode_row(row?)?);
        }
        Ok(days)
    }

    /// The row for an exact date, if present.
    pub fn day(&self, date: NaiveDate) -> Result<Option<DayRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {DAY_COLUMNS} FROM days WHERE date = ?1"))?;
        let raw = stmt
            .query_row(params![date.to_string()], Self::raw_row)
            .optional()?;

        raw.map(decode_row).transpose()
    }

    fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDay> {
        Ok(RawDay {
            date: row.get(0)?,
            id: row.get(1)?,
            mode: row.get(2)?,
            environment: row.get(3)?,
            business_focus: row.get(4)?,
            training_focus: row.get(5)?,
            micro_novelty: row.get(6)?,
            macro_novelty: row.get(7)?,
            dopamine: row.get(8)?,
            clearing: row.get(9)?,
            score: row.get(10)?,
            submitted: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }
}

impl HistoryStore for Database {
    fn load_recent(&self, limit: usize) -> Result<Vec<DayRecord>, CoreError> {
        Ok(self.recent_days(limit)?)
    }

    fn find_day(&self, date: NaiveDate) -> Result<Option<DayRecord>, CoreError> {
        Ok(self.day(date)?)
    }

    fn upsert_day(&mut self, record: &DayRecord) -> Result<(), CoreError> {
        Ok(self.upsert(record)?)
    }
}

/// Column values as stored, before decoding into domain types.
struct RawDay {
    date: String,
    id: String,
    mode: String,
    environment: f64,
    business_focus: f64,
    training_focus: f64,
    micro_novelty: String,
    macro_novelty: Option<u8>,
    dopamine: f64,
    clearing: f64,
    score: f64,
    submitted: bool,
    created_at: String,
    updated_at: String,
}

fn decode_row(raw: RawDay) -> Result<DayRecord, DatabaseError> {
    let date: NaiveDate = raw
        .date
        .parse()
        .map_err(|e: chrono::ParseError| corrupt(&raw.date, e.to_string()))?;
    let id = Uuid::parse_str(&raw.id).map_err(|e| corrupt(&raw.date, e.to_string()))?;
    let mode: Mode = raw.mode.parse().map_err(|e| corrupt(&raw.date, e))?;
    let micro_novelty: MicroNovelty =
        serde_json::from_str(&raw.micro_novelty).map_err(|e| corrupt(&raw.date, e.to_string()))?;
    let created_at = parse_timestamp(&raw.date, &raw.created_at)?;
    let updated_at = parse_timestamp(&raw.date, &raw.updated_at)?;

    Ok(DayRecord {
        id,
        date,
        mode,
        environment: raw.environment,
        business_focus: raw.business_focus,
        training_focus: raw.training_focus,
        micro_novelty,
        macro_novelty: raw.macro_novelty,
        dopamine: raw.dopamine,
        clearing: raw.clearing,
        score: raw.score,
        submitted: raw.submitted,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(date: &str, raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(date, e.to_string()))
}

fn corrupt(date: &str, message: String) -> DatabaseError {
    DatabaseError::CorruptRow {
        date: date.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::NoveltyKind;

    fn record(date: &str) -> DayRecord {
        let mut micro_novelty = MicroNovelty::new();
        micro_novelty.set_active(NoveltyKind::NewBook, true);
        micro_novelty.set_note(NoveltyKind::NewBook, Some("Finished Deep Work".to_string()));

        DayRecord {
            id: Uuid::new_v4(),
            date: date.parse().unwrap(),
            mode: Mode::Building,
            environment: 0.5,
            business_focus: 4.0,
            training_focus: 2.0,
            micro_novelty,
            macro_novelty: None,
            dopamine: 1.0,
            clearing: 2.0,
            score: 7.8,
            submitted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trips_every_field() {
        let db = Database::open_memory().unwrap();
        let original = record("2025-03-10");
        db.upsert(&original).unwrap();

        let loaded = db.day(original.date).unwrap().unwrap();
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.mode, original.mode);
        assert_eq!(loaded.business_focus, original.business_focus);
        assert_eq!(
            loaded.micro_novelty.note(NoveltyKind::NewBook),
            Some("Finished Deep Work")
        );
        assert_eq!(loaded.macro_novelty, None);
        assert_eq!(loaded.score, original.score);
        assert!(!loaded.submitted);
    }

    #[test]
    fn test_upsert_replaces_and_keeps_row_identity() {
        let db = Database::open_memory().unwrap();
        let original = record("2025-03-10");
        db.upsert(&original).unwrap();

        let mut replacement = record("2025-03-10");
        replacement.score = 9.9;
        replacement.submitted = true;
        db.upsert(&replacement).unwrap();

        let days = db.recent_days(10).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].score, 9.9);
        assert!(days[0].submitted);
        // The conflict clause keeps the first row's id and created_at.
        assert_eq!(days[0].id, original.id);
    }

    #[test]
    fn test_recent_days_ordering_and_limit() {
        let db = Database::open_memory().unwrap();
        db.upsert(&record("2025-03-08")).unwrap();
        db.upsert(&record("2025-03-10")).unwrap();
        db.upsert(&record("2025-03-09")).unwrap();

        let days = db.recent_days(2).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2025-03-10".parse().unwrap());
        assert_eq!(days[1].date, "2025-03-09".parse().unwrap());
    }

    #[test]
    fn test_expanding_day_stores_macro_novelty() {
        let db = Database::open_memory().unwrap();
        let mut rec = record("2025-03-11");
        rec.mode = Mode::Expanding;
        rec.macro_novelty = Some(8);
        db.upsert(&rec).unwrap();

        let loaded = db.day(rec.date).unwrap().unwrap();
        assert_eq!(loaded.mode, Mode::Expanding);
        assert_eq!(loaded.macro_novelty, Some(8));
    }

    #[test]
    fn test_open_at_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expansion.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.upsert(&record("2025-03-10")).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.recent_days(10).unwrap().len(), 1);
    }
}
