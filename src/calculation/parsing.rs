//! Parsing of raw punch rows.
//!
//! Punch sheets store the date and the time of a punch in two separate
//! text columns with fixed formats: `DD/MM/YYYY` and `HH:MM:SS` (24-hour
//! clock). This module turns them into typed values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{Direction, Punch, PunchRecord};

/// Format of the `Date` column.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the `Punch Time` column.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Parses a `DD/MM/YYYY` date.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_date("15/01/2024").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
/// );
/// assert!(parse_date("2024-01-15").is_err());
/// ```
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        EngineError::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}

/// Parses an `HH:MM:SS` time.
pub fn parse_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        EngineError::InvalidTimeFormat {
            value: value.to_string(),
        }
    })
}

/// Combines separately stored date and time fields into one instant.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::parse_timestamp;
///
/// let ts = parse_timestamp("15/01/2024", "13:45:10").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-15 13:45:10");
/// ```
pub fn parse_timestamp(date: &str, time: &str) -> EngineResult<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time))
}

/// Converts a raw punch row into a typed [`Punch`].
///
/// Fails with `InvalidDateFormat` or `InvalidTimeFormat`; an unrecognised
/// direction is kept as [`Direction::Unknown`].
pub fn parse_record(record: &PunchRecord) -> EngineResult<Punch> {
    Ok(Punch {
        person: record.name.clone(),
        timestamp: parse_timestamp(&record.date, &record.punch_time)?,
        direction: Direction::from_raw(&record.io_type),
    })
}
