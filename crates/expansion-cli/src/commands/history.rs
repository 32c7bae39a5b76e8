use clap::Subcommand;

use expansion_core::Database;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recent day records, newest first
    List {
        /// Maximum number of records
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HistoryAction::List { limit } => {
            let days = db.recent_days(limit)?;
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
    }
    Ok(())
}
