use clap::Subcommand;
use risetrack_core::{
    parse_day, parse_hhmm, Database, NewWakeRecord, ValidationError, WakeRecordPatch,
};

#[derive(Subcommand)]
pub enum RecordAction {
    /// Add a wake-up entry for a day
    Add {
        /// Day (YYYY-MM-DD)
        day: String,
        /// Wake time (HH:MM)
        wake_time: String,
        /// Sleep time (HH:MM)
        #[arg(long)]
        sleep_time: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List entries, day-ascending
    List {
        /// Inclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the entry for a day
    Show {
        /// Day (YYYY-MM-DD)
        day: String,
    },
    /// Update an entry; pass an empty string to clear sleep time or note
    Update {
        /// Day (YYYY-MM-DD)
        day: String,
        /// New wake time (HH:MM)
        #[arg(long)]
        wake_time: Option<String>,
        /// New sleep time (HH:MM, empty clears)
        #[arg(long)]
        sleep_time: Option<String>,
        /// New note (empty clears)
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete the entry for a day
    Delete {
        /// Day (YYYY-MM-DD)
        day: String,
    },
}

pub fn run(action: RecordAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        RecordAction::Add {
            day,
            wake_time,
            sleep_time,
            note,
        } => {
            let new = NewWakeRecord {
                day: parse_day(&day)?,
                wake_time: parse_hhmm("wake_time", &wake_time)?,
                sleep_time: sleep_time
                    .filter(|s| !s.is_empty())
                    .map(|s| parse_hhmm("sleep_time", &s))
                    .transpose()?,
                note: note.filter(|n| !n.is_empty()),
            };
            let record = db.insert_record(new)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        RecordAction::List { from, to } => {
            let from = from.as_deref().map(parse_day).transpose()?;
            let to = to.as_deref().map(parse_day).transpose()?;
            let records = db.list_records(from, to)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        RecordAction::Show { day } => {
            let day = parse_day(&day)?;
            match db.record_for_day(day)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => return Err(format!("Day '{day}' not found").into()),
            }
        }
        RecordAction::Update {
            day,
            wake_time,
            sleep_time,
            note,
        } => {
            let day = parse_day(&day)?;
            let patch = WakeRecordPatch {
                wake_time: wake_time
                    .map(|s| parse_hhmm("wake_time", &s))
                    .transpose()?,
                sleep_time: sleep_time
                    .map(|s| {
                        if s.is_empty() {
                            Ok(None)
                        } else {
                            parse_hhmm("sleep_time", &s).map(Some)
                        }
                    })
                    .transpose()?,
                note: note.map(|n| if n.is_empty() { None } else { Some(n) }),
            };
            if patch.is_empty() {
                return Err(ValidationError::EmptyUpdate.into());
            }
            match db.update_record(day, patch)? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => return Err(format!("Day '{day}' not found").into()),
            }
        }
        RecordAction::Delete { day } => {
            let day = parse_day(&day)?;
            if db.delete_record(day)? {
                println!("Day '{day}' deleted");
            } else {
                return Err(format!("Day '{day}' not found").into());
            }
        }
    }
    Ok(())
}
