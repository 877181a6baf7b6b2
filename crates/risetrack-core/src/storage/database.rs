//! SQLite-based wake-up record storage.
//!
//! One row per calendar day, keyed by the day. Days are stored as
//! `YYYY-MM-DD` text, times as `HH:MM` text, creation timestamps as
//! RFC 3339 text, so rows sort and range-filter correctly with plain
//! string comparison.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use super::migrations;
use crate::error::DatabaseError;
use crate::record::{format_day, format_hhmm, NewWakeRecord, WakeRecord, WakeRecordPatch};
use crate::streak::WakeSample;

const RECORD_COLUMNS: &str = "day, wake_time, sleep_time, note, created_at";

/// SQLite database for wake-up records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/risetrack/risetrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("risetrack.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path, creating schema as needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert a new record. The creation timestamp is taken at insert time.
    ///
    /// # Errors
    /// Returns [`DatabaseError::DuplicateDay`] if a record for the day
    /// already exists.
    pub fn insert_record(&self, new: NewWakeRecord) -> Result<WakeRecord, DatabaseError> {
        let created_at = Utc::now();
        let inserted = self.conn.execute(
            "INSERT INTO wakeups (day, wake_time, sleep_time, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                format_day(new.day),
                format_hhmm(new.wake_time),
                new.sleep_time.map(format_hhmm),
                new.note,
                created_at.to_rfc3339(),
            ],
        );
        match inserted {
            Ok(_) => Ok(WakeRecord {
                day: new.day,
                wake_time: new.wake_time,
                sleep_time: new.sleep_time,
                note: new.note,
                created_at,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DatabaseError::DuplicateDay { day: new.day })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up the record for a single day.
    pub fn record_for_day(&self, day: NaiveDate) -> Result<Option<WakeRecord>, DatabaseError> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM wakeups WHERE day = ?1"),
                params![format_day(day)],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// List records with optional inclusive day bounds, ascending by day.
    pub fn list_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<WakeRecord>, DatabaseError> {
        let mut sql = format!("SELECT {RECORD_COLUMNS} FROM wakeups");
        let mut bounds: Vec<String> = Vec::new();
        match (from, to) {
            (Some(from), Some(to)) => {
                sql.push_str(" WHERE day BETWEEN ?1 AND ?2");
                bounds.push(format_day(from));
                bounds.push(format_day(to));
            }
            (Some(from), None) => {
                sql.push_str(" WHERE day >= ?1");
                bounds.push(format_day(from));
            }
            (None, Some(to)) => {
                sql.push_str(" WHERE day <= ?1");
                bounds.push(format_day(to));
            }
            (None, None) => {}
        }
        sql.push_str(" ORDER BY day ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(bounds.iter()), record_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Apply a partial update to the record for a day.
    ///
    /// Returns the updated record, or `None` when no record exists for the
    /// day. The day and creation timestamp are never changed. Callers must
    /// reject empty patches before calling.
    pub fn update_record(
        &self,
        day: NaiveDate,
        patch: WakeRecordPatch,
    ) -> Result<Option<WakeRecord>, DatabaseError> {
        let Some(existing) = self.record_for_day(day)? else {
            return Ok(None);
        };

        let updated = WakeRecord {
            day,
            wake_time: patch.wake_time.unwrap_or(existing.wake_time),
            sleep_time: patch.sleep_time.unwrap_or(existing.sleep_time),
            note: patch.note.unwrap_or(existing.note),
            created_at: existing.created_at,
        };
        self.conn.execute(
            "UPDATE wakeups SET wake_time = ?1, sleep_time = ?2, note = ?3 WHERE day = ?4",
            params![
                format_hhmm(updated.wake_time),
                updated.sleep_time.map(format_hhmm),
                updated.note,
                format_day(day),
            ],
        )?;
        Ok(Some(updated))
    }

    /// Delete the record for a day. Returns whether a record existed.
    pub fn delete_record(&self, day: NaiveDate) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM wakeups WHERE day = ?1", params![format_day(day)])?;
        Ok(deleted > 0)
    }

    /// Day-ascending (day, wake time) projection for the streak engine.
    pub fn wake_samples(&self) -> Result<Vec<WakeSample>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT day, wake_time FROM wakeups ORDER BY day ASC")?;
        let rows = stmt.query_map([], |row| {
            let day: String = row.get(0)?;
            let wake_time: String = row.get(1)?;
            Ok(WakeSample {
                day: parse_day_column(0, &day)?,
                wake_time: parse_time_column(1, &wake_time)?,
            })
        })?;
        let mut samples = Vec::new();
        for row in rows {
            samples.push(row?);
        }
        Ok(samples)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<WakeRecord> {
    let day: String = row.get(0)?;
    let wake_time: String = row.get(1)?;
    let sleep_time: Option<String> = row.get(2)?;
    let note: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(WakeRecord {
        day: parse_day_column(0, &day)?,
        wake_time: parse_time_column(1, &wake_time)?,
        sleep_time: sleep_time
            .map(|s| parse_time_column(2, &s))
            .transpose()?,
        note,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| conversion_failure(4, e))?,
    })
}

fn parse_day_column(idx: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| conversion_failure(idx, e))
}

fn parse_time_column(idx: usize, value: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| conversion_failure(idx, e))
}

fn conversion_failure(idx: usize, err: chrono::ParseError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::{compute_streak, StreakQuery};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn new_record(d: NaiveDate, wake: NaiveTime) -> NewWakeRecord {
        NewWakeRecord {
            day: d,
            wake_time: wake,
            sleep_time: None,
            note: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_memory().unwrap();
        let record = db
            .insert_record(NewWakeRecord {
                day: day(2026, 2, 1),
                wake_time: time(6, 55),
                sleep_time: Some(time(23, 10)),
                note: Some("slept well".to_string()),
            })
            .unwrap();
        assert_eq!(record.day, day(2026, 2, 1));

        let fetched = db.record_for_day(day(2026, 2, 1)).unwrap().unwrap();
        assert_eq!(fetched, record);
        assert!(db.record_for_day(day(2026, 2, 2)).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_day_is_rejected() {
        let db = Database::open_memory().unwrap();
        db.insert_record(new_record(day(2026, 2, 1), time(6, 55)))
            .unwrap();
        let err = db
            .insert_record(new_record(day(2026, 2, 1), time(7, 5)))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateDay { .. }));
    }

    #[test]
    fn test_list_is_day_ascending_regardless_of_insert_order() {
        let db = Database::open_memory().unwrap();
        for d in [day(2026, 2, 3), day(2026, 2, 1), day(2026, 2, 2)] {
            db.insert_record(new_record(d, time(6, 55))).unwrap();
        }
        let days: Vec<NaiveDate> = db
            .list_records(None, None)
            .unwrap()
            .into_iter()
            .map(|r| r.day)
            .collect();
        assert_eq!(days, vec![day(2026, 2, 1), day(2026, 2, 2), day(2026, 2, 3)]);
    }

    #[test]
    fn test_list_range_bounds_are_inclusive() {
        let db = Database::open_memory().unwrap();
        for d in 1..=5 {
            db.insert_record(new_record(day(2026, 2, d), time(6, 55)))
                .unwrap();
        }

        let both = db
            .list_records(Some(day(2026, 2, 2)), Some(day(2026, 2, 4)))
            .unwrap();
        assert_eq!(both.len(), 3);
        assert_eq!(both.first().unwrap().day, day(2026, 2, 2));
        assert_eq!(both.last().unwrap().day, day(2026, 2, 4));

        let from_only = db.list_records(Some(day(2026, 2, 4)), None).unwrap();
        assert_eq!(from_only.len(), 2);

        let to_only = db.list_records(None, Some(day(2026, 2, 1))).unwrap();
        assert_eq!(to_only.len(), 1);
    }

    #[test]
    fn test_update_patches_only_set_fields() {
        let db = Database::open_memory().unwrap();
        let original = db
            .insert_record(NewWakeRecord {
                day: day(2026, 2, 1),
                wake_time: time(6, 55),
                sleep_time: Some(time(23, 10)),
                note: Some("first".to_string()),
            })
            .unwrap();

        let updated = db
            .update_record(
                day(2026, 2, 1),
                WakeRecordPatch {
                    wake_time: Some(time(7, 20)),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.wake_time, time(7, 20));
        assert_eq!(updated.sleep_time, Some(time(23, 10)));
        assert_eq!(updated.note, Some("first".to_string()));
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let db = Database::open_memory().unwrap();
        db.insert_record(NewWakeRecord {
            day: day(2026, 2, 1),
            wake_time: time(6, 55),
            sleep_time: Some(time(23, 10)),
            note: Some("first".to_string()),
        })
        .unwrap();

        let updated = db
            .update_record(
                day(2026, 2, 1),
                WakeRecordPatch {
                    sleep_time: Some(None),
                    note: Some(None),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.sleep_time, None);
        assert_eq!(updated.note, None);

        let fetched = db.record_for_day(day(2026, 2, 1)).unwrap().unwrap();
        assert_eq!(fetched.sleep_time, None);
        assert_eq!(fetched.note, None);
    }

    #[test]
    fn test_update_missing_day_returns_none() {
        let db = Database::open_memory().unwrap();
        let result = db
            .update_record(
                day(2026, 2, 1),
                WakeRecordPatch {
                    wake_time: Some(time(7, 0)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_delete() {
        let db = Database::open_memory().unwrap();
        db.insert_record(new_record(day(2026, 2, 1), time(6, 55)))
            .unwrap();
        assert!(db.delete_record(day(2026, 2, 1)).unwrap());
        assert!(!db.delete_record(day(2026, 2, 1)).unwrap());
        assert!(db.record_for_day(day(2026, 2, 1)).unwrap().is_none());
    }

    #[test]
    fn test_wake_samples_feed_the_streak_engine() {
        let db = Database::open_memory().unwrap();
        db.insert_record(new_record(day(2026, 2, 2), time(6, 55)))
            .unwrap();
        db.insert_record(new_record(day(2026, 2, 1), time(6, 55)))
            .unwrap();
        db.insert_record(new_record(day(2026, 2, 4), time(6, 55)))
            .unwrap();

        let samples = db.wake_samples().unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples.windows(2).all(|pair| pair[0].day < pair[1].day));

        let result = compute_streak(
            &samples,
            &StreakQuery {
                target_time: time(7, 0),
                tolerance_min: 10,
            },
        );
        assert_eq!(result.best_streak, 2);
        assert_eq!(result.current_streak, 1);
    }
}
