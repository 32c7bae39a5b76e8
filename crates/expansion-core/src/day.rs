//! Day records, editable drafts, and the micro-novelty model.
//!
//! A [`DayRecord`] is one persisted row per calendar day. A [`DayInput`] is
//! the editable draft for the date currently being tracked; the engine reads
//! either shape through the same field names. Dates are day-granular
//! [`NaiveDate`]s with no timezone component.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operating mode for a tracked day.
///
/// Building days are scored on focused execution in a known environment;
/// Expanding days are scored on the novelty of the experience itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Building,
    Expanding,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Building => "building",
            Mode::Expanding => "expanding",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "building" => Ok(Mode::Building),
            "expanding" => Ok(Mode::Expanding),
            other => Err(format!("unknown mode '{other}' (expected 'building' or 'expanding')")),
        }
    }
}

/// The five micro-novelty signals a Building day can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoveltyKind {
    NewBook,
    NewPerson,
    NewMethod,
    NewPlace,
    NewChallenge,
}

impl NoveltyKind {
    /// All signals in their canonical order.
    pub const ALL: [NoveltyKind; 5] = [
        NoveltyKind::NewBook,
        NoveltyKind::NewPerson,
        NoveltyKind::NewMethod,
        NoveltyKind::NewPlace,
        NoveltyKind::NewChallenge,
    ];

    /// Human-readable description of the signal
    pub fn description(&self) -> &'static str {
        match self {
            NoveltyKind::NewBook => "New knowledge input",
            NoveltyKind::NewPerson => "New conversation",
            NoveltyKind::NewMethod => "New technique or approach",
            NoveltyKind::NewPlace => "Worked from a new spot",
            NoveltyKind::NewChallenge => "Tackled something difficult",
        }
    }
}

impl std::str::FromStr for NoveltyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_book" => Ok(NoveltyKind::NewBook),
            "new_person" => Ok(NoveltyKind::NewPerson),
            "new_method" => Ok(NoveltyKind::NewMethod),
            "new_place" => Ok(NoveltyKind::NewPlace),
            "new_challenge" => Ok(NoveltyKind::NewChallenge),
            other => Err(format!(
                "unknown novelty signal '{other}' (expected one of: new_book, new_person, new_method, new_place, new_challenge)"
            )),
        }
    }
}

/// One micro-novelty entry: a flag plus an optional free-text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoveltySignal {
    /// Which signal this entry is
    pub kind: NoveltyKind,
    /// Whether the signal fired today
    pub active: bool,
    /// Optional note describing what was new
    #[serde(default)]
    pub note: Option<String>,
}

/// The fixed, ordered set of five micro-novelty signals for one day.
///
/// Each signal is worth 0.5 toward the Building-mode novelty score, for a
/// maximum of 2.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroNovelty {
    signals: [NoveltySignal; 5],
}

impl MicroNovelty {
    /// Points contributed per active signal.
    pub const POINTS_PER_SIGNAL: f64 = 0.5;

    /// All five signals inactive, no notes.
    pub fn new() -> Self {
        Self {
            signals: NoveltyKind::ALL.map(|kind| NoveltySignal {
                kind,
                active: false,
                note: None,
            }),
        }
    }

    /// The signals in canonical order.
    pub fn signals(&self) -> &[NoveltySignal; 5] {
        &self.signals
    }

    pub fn is_active(&self, kind: NoveltyKind) -> bool {
        self.entry(kind).active
    }

    pub fn set_active(&mut self, kind: NoveltyKind, active: bool) {
        self.entry_mut(kind).active = active;
    }

    pub fn note(&self, kind: NoveltyKind) -> Option<&str> {
        self.entry(kind).note.as_deref()
    }

    pub fn set_note(&mut self, kind: NoveltyKind, note: Option<String>) {
        self.entry_mut(kind).note = note;
    }

    /// Number of signals that fired.
    pub fn active_count(&self) -> usize {
        self.signals.iter().filter(|s| s.active).count()
    }

    /// Micro-novelty score: 0.5 per active signal, 0 to 2.5.
    pub fn score(&self) -> f64 {
        self.active_count() as f64 * Self::POINTS_PER_SIGNAL
    }

    fn entry(&self, kind: NoveltyKind) -> &NoveltySignal {
        // ALL and signals share ordering, so position lookup cannot miss.
        &self.signals[kind as usize]
    }

    fn entry_mut(&mut self, kind: NoveltyKind) -> &mut NoveltySignal {
        &mut self.signals[kind as usize]
    }
}

impl Default for MicroNovelty {
    fn default() -> Self {
        Self::new()
    }
}

/// One persisted day, keyed uniquely by date.
///
/// `score` is always derived by the engine and never hand-edited; `submitted`
/// marks a finalized day that the tracker will no longer autosave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Row id
    pub id: Uuid,
    /// Calendar date, unique per user
    pub date: NaiveDate,
    pub mode: Mode,
    /// Environment multiplier, 0.0 to 1.0 in 0.1 steps (Building mode only)
    pub environment: f64,
    /// Hours of focused work
    pub business_focus: f64,
    /// Hours of physical training
    pub training_focus: f64,
    pub micro_novelty: MicroNovelty,
    /// 1 to 10 experience-novelty rating; stored only for Expanding days
    pub macro_novelty: Option<u8>,
    /// Hours of low-effort stimulation
    pub dopamine: f64,
    /// Recovery units that offset dopamine
    pub clearing: f64,
    /// Derived day score, one decimal place
    pub score: f64,
    /// Finalization flag
    pub submitted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DayRecord {
    /// Business plus training hours.
    pub fn total_focus(&self) -> f64 {
        self.business_focus + self.training_focus
    }
}

/// Editable draft state for the date being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInput {
    pub mode: Mode,
    pub environment: f64,
    pub business_focus: f64,
    pub training_focus: f64,
    pub micro_novelty: MicroNovelty,
    pub macro_novelty: u8,
    pub dopamine: f64,
    pub clearing: f64,
    pub submitted: bool,
}

impl DayInput {
    /// Business plus training hours.
    pub fn total_focus(&self) -> f64 {
        self.business_focus + self.training_focus
    }

    /// Rehydrate a draft from a stored record.
    ///
    /// A Building row stores no macro novelty; the draft falls back to the
    /// mid-scale default so switching the day to Expanding starts from 5.
    pub fn from_record(record: &DayRecord) -> Self {
        Self {
            mode: record.mode,
            environment: record.environment,
            business_focus: record.business_focus,
            training_focus: record.training_focus,
            micro_novelty: record.micro_novelty.clone(),
            macro_novelty: record.macro_novelty.unwrap_or(DEFAULT_MACRO_NOVELTY),
            dopamine: record.dopamine,
            clearing: record.clearing,
            submitted: record.submitted,
        }
    }
}

const DEFAULT_MACRO_NOVELTY: u8 = 5;

impl Default for DayInput {
    /// Fresh draft: Building mode, mid environment, mid macro novelty,
    /// nothing logged yet.
    fn default() -> Self {
        Self {
            mode: Mode::Building,
            environment: 0.5,
            business_focus: 0.0,
            training_focus: 0.0,
            micro_novelty: MicroNovelty::new(),
            macro_novelty: DEFAULT_MACRO_NOVELTY,
            dopamine: 0.0,
            clearing: 0.0,
            submitted: false,
        }
    }
}
