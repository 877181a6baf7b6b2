use clap::Args;
use risetrack_core::record::format_hhmm;
use risetrack_core::{compute_streak, parse_hhmm, Config, Database, StreakQuery};

#[derive(Args)]
pub struct StreakArgs {
    /// Target wake time (HH:MM); defaults to the configured value
    #[arg(long)]
    target_time: Option<String>,
    /// Tolerance in minutes, may be negative; defaults to the configured
    /// value
    #[arg(long)]
    tolerance_min: Option<i32>,
}

pub fn run(args: StreakArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let target_time = match args.target_time {
        Some(s) => parse_hhmm("target_time", &s)?,
        None => config.streak.target_time,
    };
    let tolerance_min = args.tolerance_min.unwrap_or(config.streak.tolerance_min);

    let db = Database::open()?;
    let samples = db.wake_samples()?;
    let result = compute_streak(
        &samples,
        &StreakQuery {
            target_time,
            tolerance_min,
        },
    );

    let report = serde_json::json!({
        "target_time": format_hhmm(target_time),
        "tolerance_min": tolerance_min,
        "current_streak": result.current_streak,
        "best_streak": result.best_streak,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
