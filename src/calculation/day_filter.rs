//! Day filtering of punches.
//!
//! Slices one person's punches down to a single calendar date. The day is
//! the closed interval `[date 00:00:00, date 23:59:59]`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::EngineResult;
use crate::models::{Punch, PunchRecord};

use super::parsing::{parse_date, parse_record};

/// Returns the inclusive bounds of a calendar day.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::day_bounds;
/// use chrono::NaiveDate;
///
/// let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// assert_eq!(start.to_string(), "2024-01-15 00:00:00");
/// assert_eq!(end.to_string(), "2024-01-15 23:59:59");
/// ```
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (
        date.and_time(NaiveTime::MIN),
        date.and_hms_opt(23, 59, 59)
            .expect("Valid end of day time"),
    )
}

/// Selects the punches whose timestamp falls within `date`.
///
/// The caller guarantees that all punches belong to one person. Relative
/// order is preserved, and filtering an already filtered slice for the same
/// date returns it unchanged. An empty result means no shift that day.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::filter_for_day;
/// use shift_hours::models::{Direction, Punch};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     Punch { person: "Alice".into(), timestamp: at("2024-01-14 23:00:00"), direction: Direction::In },
///     Punch { person: "Alice".into(), timestamp: at("2024-01-15 09:00:00"), direction: Direction::In },
///     Punch { person: "Alice".into(), timestamp: at("2024-01-15 17:00:00"), direction: Direction::Out },
/// ];
///
/// let slice = filter_for_day(&punches, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// assert_eq!(slice.len(), 2);
/// assert_eq!(slice[0].timestamp, at("2024-01-15 09:00:00"));
/// ```
pub fn filter_for_day(punches: &[Punch], date: NaiveDate) -> Vec<Punch> {
    let (start, end) = day_bounds(date);
    punches
        .iter()
        .filter(|p| p.timestamp >= start && p.timestamp <= end)
        .cloned()
        .collect()
}

/// Filters raw punch rows for the day given as `DD/MM/YYYY` text.
///
/// Each row's date and time columns are combined into one instant before
/// comparison. Fails with `InvalidDateFormat` if `date` or any row date
/// cannot be parsed, and `InvalidTimeFormat` for a bad row time.
pub fn filter_records_for_day(records: &[PunchRecord], date: &str) -> EngineResult<Vec<Punch>> {
    let date = parse_date(date)?;
    let punches = records
        .iter()
        .map(parse_record)
        .collect::<EngineResult<Vec<_>>>()?;
    Ok(filter_for_day(&punches, date))
}
