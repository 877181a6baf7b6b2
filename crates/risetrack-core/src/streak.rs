//! Wake-up streak computation.
//!
//! Given a day-ascending history of (day, wake time) samples and a success
//! threshold, reports:
//! - **best streak**: the longest run of calendar-consecutive on-time days
//!   anywhere in the history
//! - **current streak**: the run ending at the most recent recorded day
//!
//! A wake-up is on time iff its minute-of-day is at or before the target's
//! minute-of-day plus the tolerance. A missing calendar day breaks a run the
//! same way a late wake-up does. Pure and synchronous; callers hand the
//! engine a snapshot and it performs no I/O.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::record::hhmm;

/// The (day, wake time) projection of a record that the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeSample {
    pub day: NaiveDate,
    #[serde(with = "hhmm")]
    pub wake_time: NaiveTime,
}

/// Success threshold for a streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakQuery {
    /// Desired wake time.
    #[serde(with = "hhmm")]
    pub target_time: NaiveTime,
    /// Minutes added to the target to form the effective limit. May be
    /// negative.
    pub tolerance_min: i32,
}

/// Current and best streaks over a recorded history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Compute the current and best on-time streaks.
///
/// `samples` must be strictly ascending by day and day-unique; the storage
/// layer guarantees this for persisted data. The precondition is asserted
/// in debug builds only, keeping the engine a pair of O(n) scans.
///
/// The effective limit is `minute(target) + tolerance` compared as a plain
/// integer. No midnight wraparound: a limit of 1440 or more is satisfied by
/// every wake time, a negative limit by none.
pub fn compute_streak(samples: &[WakeSample], query: &StreakQuery) -> StreakResult {
    debug_assert!(
        samples.windows(2).all(|pair| pair[0].day < pair[1].day),
        "samples must be strictly ascending by day"
    );

    let limit = minute_of_day(query.target_time) + query.tolerance_min;
    let on_time = |sample: &WakeSample| minute_of_day(sample.wake_time) <= limit;

    // Best streak: forward scan. A calendar gap resets the run before the
    // current day is evaluated, regardless of that day's own outcome.
    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev_day: Option<NaiveDate> = None;
    for sample in samples {
        if let Some(prev) = prev_day {
            if (sample.day - prev).num_days() != 1 {
                run = 0;
            }
        }
        if on_time(sample) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
        prev_day = Some(sample.day);
    }

    // Current streak: backward scan from the most recent day, stopping at
    // the first gap or late wake-up. A gap stops the scan before the older
    // record is evaluated.
    let mut current = 0u32;
    let mut next_day: Option<NaiveDate> = None;
    for sample in samples.iter().rev() {
        if let Some(next) = next_day {
            if (next - sample.day).num_days() != 1 {
                break;
            }
        }
        if !on_time(sample) {
            break;
        }
        current += 1;
        next_day = Some(sample.day);
    }

    StreakResult {
        current_streak: current,
        best_streak: best,
    }
}

fn minute_of_day(time: NaiveTime) -> i32 {
    time.hour() as i32 * 60 + time.minute() as i32
}
