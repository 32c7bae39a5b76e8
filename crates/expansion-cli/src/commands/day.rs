use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde_json::json;

use expansion_core::{Config, Database, DayTracker, Mode, NoveltyKind};

#[derive(Subcommand)]
pub enum DayAction {
    /// Show a day's draft and its evaluation
    Show {
        /// Date to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit a day's draft and save it
    Set(SetArgs),
    /// Finalize a day
    Submit {
        /// Date to submit (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args)]
pub struct SetArgs {
    /// Date to edit (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// building | expanding
    #[arg(long)]
    mode: Option<String>,
    /// Environment multiplier, 0.0 to 1.0
    #[arg(long)]
    environment: Option<f64>,
    /// Hours of focused work
    #[arg(long)]
    business_focus: Option<f64>,
    /// Hours of physical training
    #[arg(long)]
    training_focus: Option<f64>,
    /// Macro novelty rating, 1 to 10
    #[arg(long)]
    macro_novelty: Option<u8>,
    /// Hours of low-effort stimulation
    #[arg(long)]
    dopamine: Option<f64>,
    /// Recovery units
    #[arg(long)]
    clearing: Option<f64>,
    /// Activate a micro-novelty signal (e.g. --novelty new_book), repeatable
    #[arg(long)]
    novelty: Vec<String>,
    /// Deactivate a micro-novelty signal, repeatable
    #[arg(long)]
    clear_novelty: Vec<String>,
    /// Attach a note to a signal as kind=text (e.g. --note "new_book=Deep Work")
    #[arg(long)]
    note: Vec<String>,
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let today = Utc::now().date_naive();
    let mut tracker = DayTracker::with_config(db, today, &config.tracker)?;

    match action {
        DayAction::Show { date } => {
            if let Some(date) = date {
                tracker.select_date(date);
            }
            let output = json!({
                "date": tracker.selected_date(),
                "draft": tracker.draft(),
                "evaluation": tracker.evaluation(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        DayAction::Set(args) => {
            if let Some(date) = args.date {
                tracker.select_date(date);
            }

            let mode = args.mode.as_deref().map(str::parse::<Mode>).transpose()?;
            let novelty = parse_kinds(&args.novelty)?;
            let clear_novelty = parse_kinds(&args.clear_novelty)?;
            let notes = parse_notes(&args.note)?;

            tracker.update(Utc::now(), |draft| {
                if let Some(mode) = mode {
                    draft.mode = mode;
                }
                if let Some(environment) = args.environment {
                    draft.environment = environment;
                }
                if let Some(business_focus) = args.business_focus {
                    draft.business_focus = business_focus;
                }
                if let Some(training_focus) = args.training_focus {
                    draft.training_focus = training_focus;
                }
                if let Some(macro_novelty) = args.macro_novelty {
                    draft.macro_novelty = macro_novelty;
                }
                if let Some(dopamine) = args.dopamine {
                    draft.dopamine = dopamine;
                }
                if let Some(clearing) = args.clearing {
                    draft.clearing = clearing;
                }
                for kind in novelty {
                    draft.micro_novelty.set_active(kind, true);
                }
                for kind in clear_novelty {
                    draft.micro_novelty.set_active(kind, false);
                }
                for (kind, text) in notes {
                    draft.micro_novelty.set_note(kind, Some(text));
                }
            });

            let record = tracker.save(false, Utc::now())?;
            let evaluation = tracker.evaluation();
            println!(
                "Saved {}: score {:.1}, streak {}",
                record.date, record.score, evaluation.streak
            );
            println!("{}", evaluation.insight);
        }
        DayAction::Submit { date } => {
            if let Some(date) = date {
                tracker.select_date(date);
            }
            let record = tracker.save(true, Utc::now())?;
            println!("Submitted {}: score {:.1}", record.date, record.score);
        }
    }

    Ok(())
}

fn parse_kinds(raw: &[String]) -> Result<Vec<NoveltyKind>, Box<dyn std::error::Error>> {
    raw.iter()
        .map(|s| s.parse::<NoveltyKind>().map_err(Into::into))
        .collect()
}

fn parse_notes(raw: &[String]) -> Result<Vec<(NoveltyKind, String)>, Box<dyn std::error::Error>> {
    raw.iter()
        .map(|entry| {
            let (kind, text) = entry
                .split_once('=')
                .ok_or_else(|| format!("expected kind=text, got '{entry}'"))?;
            Ok((kind.parse::<NoveltyKind>()?, text.to_string()))
        })
        .collect()
}
