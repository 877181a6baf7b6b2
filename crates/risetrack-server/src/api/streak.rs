//! Streak endpoint: runs the engine over the full recorded history.

use actix_web::{get, web, HttpResponse};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use risetrack_core::record::hhmm;
use risetrack_core::{compute_streak, parse_hhmm, parse_tolerance, StreakQuery};

use super::{lock_db, ApiError, AppState};

#[derive(Debug, Deserialize)]
struct StreakParams {
    target_time: Option<String>,
    tolerance_min: Option<String>,
}

#[derive(Debug, Serialize)]
struct StreakReport {
    #[serde(with = "hhmm")]
    target_time: NaiveTime,
    tolerance_min: i32,
    current_streak: u32,
    best_streak: u32,
}

#[get("/streak")]
pub(crate) async fn get_streak(
    state: web::Data<AppState>,
    params: web::Query<StreakParams>,
) -> Result<HttpResponse, ApiError> {
    let defaults = &state.config.streak;
    let target_time = match params.target_time.as_deref() {
        Some(s) => parse_hhmm("target_time", s)?,
        None => defaults.target_time,
    };
    let tolerance_min = match params.tolerance_min.as_deref() {
        Some(s) => parse_tolerance(s)?,
        None => defaults.tolerance_min,
    };

    let samples = lock_db(&state)?.wake_samples()?;
    let result = compute_streak(
        &samples,
        &StreakQuery {
            target_time,
            tolerance_min,
        },
    );

    Ok(HttpResponse::Ok().json(StreakReport {
        target_time,
        tolerance_min,
        current_streak: result.current_streak,
        best_streak: result.best_streak,
    }))
}
