use expansion_core::{Config, Database, HistorySummary, HistoryStore};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;

    let history = db.load_recent(config.tracker.history_window)?;
    let summary = HistorySummary::from_history(&history);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
