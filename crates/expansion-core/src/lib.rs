//! # Expansion Core Library
//!
//! Core business logic for the Expansion daily-activity tracker. All
//! operations are available through a standalone CLI binary; any GUI layer
//! is expected to be a thin shell over this same library.
//!
//! ## Architecture
//!
//! - **Engine**: pure, total functions that turn a day's inputs and a history
//!   snapshot into a score, a streak, a stagnation flag, and an insight
//!   message; re-invoked from scratch on every change, never caching
//! - **Tracker**: the stateful shell that owns the editable draft, the loaded
//!   history window, and debounced autosave; all clocks are caller-supplied
//! - **Storage**: SQLite-based day records and TOML-based configuration,
//!   behind the [`HistoryStore`] collaborator trait
//!
//! ## Key Components
//!
//! - [`evaluate`]: one-shot engine invocation for a day
//! - [`DayTracker`]: draft editing and persistence orchestration
//! - [`Database`]: day record persistence
//! - [`Config`]: application configuration management

pub mod autosave;
pub mod day;
pub mod engine;
pub mod error;
pub mod history;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use autosave::AutosavePolicy;
pub use day::{DayInput, DayRecord, MicroNovelty, Mode, NoveltyKind, NoveltySignal};
pub use engine::{evaluate, DayEvaluation};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use history::{HistoryStore, MemoryHistory};
pub use stats::HistorySummary;
pub use storage::{Config, Database, TrackerConfig};
pub use tracker::DayTracker;
