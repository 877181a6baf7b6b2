//! CRUD handlers for wake-up records.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;

use risetrack_core::{parse_day, parse_hhmm, NewWakeRecord, ValidationError, WakeRecordPatch};

use super::{lock_db, ApiError, AppState};

#[derive(Debug, Deserialize)]
struct ListQuery {
    from: Option<String>,
    to: Option<String>,
}

#[get("/wakeups")]
pub(crate) async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let from = query.from.as_deref().map(parse_day).transpose()?;
    let to = query.to.as_deref().map(parse_day).transpose()?;

    let records = lock_db(&state)?.list_records(from, to)?;
    Ok(HttpResponse::Ok().json(records))
}

#[get("/wakeups/{day}")]
pub(crate) async fn get_by_day(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let day = parse_day(&path)?;
    match lock_db(&state)?.record_for_day(day)? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::day_not_found(day)),
    }
}

#[derive(Debug, Deserialize)]
struct CreateWakeup {
    day: Option<String>,
    wake_time: Option<String>,
    sleep_time: Option<String>,
    note: Option<String>,
}

#[post("/wakeups")]
pub(crate) async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateWakeup>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let day = body
        .day
        .ok_or_else(|| ApiError::BadRequest("Missing 'day'. Use YYYY-MM-DD.".to_string()))?;
    let wake_time = body
        .wake_time
        .ok_or_else(|| ApiError::BadRequest("Missing 'wake_time'. Use HH:MM.".to_string()))?;

    // Empty-string optionals normalize to absent.
    let new = NewWakeRecord {
        day: parse_day(&day)?,
        wake_time: parse_hhmm("wake_time", &wake_time)?,
        sleep_time: body
            .sleep_time
            .filter(|s| !s.is_empty())
            .map(|s| parse_hhmm("sleep_time", &s))
            .transpose()?,
        note: body.note.filter(|n| !n.is_empty()),
    };

    let record = lock_db(&state)?.insert_record(new)?;
    Ok(HttpResponse::Created().json(record))
}

#[derive(Debug, Deserialize)]
struct UpdateWakeup {
    wake_time: Option<String>,
    sleep_time: Option<String>,
    note: Option<String>,
}

#[put("/wakeups/{day}")]
pub(crate) async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateWakeup>,
) -> Result<HttpResponse, ApiError> {
    let day = parse_day(&path)?;
    let body = body.into_inner();

    // An empty string clears sleep_time/note. The wake time is required on
    // every record and cannot be cleared.
    let patch = WakeRecordPatch {
        wake_time: body
            .wake_time
            .map(|s| parse_hhmm("wake_time", &s))
            .transpose()?,
        sleep_time: body
            .sleep_time
            .map(|s| {
                if s.is_empty() {
                    Ok(None)
                } else {
                    parse_hhmm("sleep_time", &s).map(Some)
                }
            })
            .transpose()?,
        note: body.note.map(|n| if n.is_empty() { None } else { Some(n) }),
    };
    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate.into());
    }

    match lock_db(&state)?.update_record(day, patch)? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::day_not_found(day)),
    }
}

#[delete("/wakeups/{day}")]
pub(crate) async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let day = parse_day(&path)?;
    if lock_db(&state)?.delete_record(day)? {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": format!("Day '{day}' deleted."),
        })))
    } else {
        Err(ApiError::day_not_found(day))
    }
}
