//! Punch model and related types.
//!
//! This module defines the raw [`PunchRecord`] rows delivered by the
//! spreadsheet layer and the typed [`Punch`] events the engine works on.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The direction of a clock event.
///
/// # Example
///
/// ```
/// use shift_hours::models::Direction;
///
/// assert_eq!(Direction::from_raw("IN"), Direction::In);
/// assert_eq!(Direction::from_raw(" out "), Direction::Out);
/// assert_eq!(Direction::from_raw("BREAK"), Direction::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Clock-in (login).
    In,
    /// Clock-out (logout).
    Out,
    /// Anything the time clock reported that is neither IN nor OUT.
    Unknown,
}

impl Direction {
    /// Maps the text of an `I/O Type` cell to a direction.
    ///
    /// Matching ignores surrounding whitespace and case. Unrecognised
    /// values become [`Direction::Unknown`] rather than an error, since the
    /// calculator tolerates them.
    pub fn from_raw(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("IN") {
            Direction::In
        } else if value.eq_ignore_ascii_case("OUT") {
            Direction::Out
        } else {
            Direction::Unknown
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "IN"),
            Direction::Out => write!(f, "OUT"),
            Direction::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// One row of a punch sheet, exactly as read from the spreadsheet.
///
/// Date and time are kept as separate text fields; they are only combined
/// and validated when the day filter slices the punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// The person's name, stable across their records.
    pub name: String,
    /// The punch date as `DD/MM/YYYY`.
    pub date: String,
    /// The punch time as `HH:MM:SS` (24-hour clock).
    pub punch_time: String,
    /// The raw direction text, normally `IN` or `OUT`.
    pub io_type: String,
}

/// A single recorded clock event.
///
/// # Example
///
/// ```
/// use shift_hours::models::{Direction, Punch};
/// use chrono::NaiveDateTime;
///
/// let punch = Punch {
///     person: "Alice".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2024-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     direction: Direction::In,
/// };
/// assert_eq!(punch.date().to_string(), "2024-01-15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// Identifier of the person who punched.
    pub person: String,
    /// Combined date and time, second precision.
    pub timestamp: NaiveDateTime,
    /// Whether this is a clock-in or clock-out.
    pub direction: Direction,
}

impl Punch {
    /// Returns the calendar date the punch belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
