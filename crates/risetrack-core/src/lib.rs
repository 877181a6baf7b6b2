//! # Risetrack Core Library
//!
//! This library provides the core business logic for the Risetrack wake-up
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with the HTTP server being a thin
//! JSON layer over the same core library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: A pure function over a day-ordered wake history that
//!   reports the current and best on-time streaks
//! - **Storage**: SQLite-based record storage and TOML-based configuration
//! - **Records**: One wake-up record per calendar day, keyed by the day
//!
//! ## Key Components
//!
//! - [`compute_streak`]: Streak computation over a day-ordered history
//! - [`Database`]: Wake-up record persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod record;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use record::{parse_day, parse_hhmm, parse_tolerance, NewWakeRecord, WakeRecord, WakeRecordPatch};
pub use storage::{Config, Database};
pub use streak::{compute_streak, StreakQuery, StreakResult, WakeSample};
