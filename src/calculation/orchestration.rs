//! Sheet and workbook summarisation.
//!
//! Enumerates (person, date) pairs in first-seen order, slices each
//! person's punches with the day filter and runs the shift calculator on
//! every non-empty slice.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, NegativeNetPolicy};
use crate::error::EngineResult;
use crate::models::{
    Punch, PunchRecord, Severity, SheetOutcome, SheetSummaries, ShiftSummary, ShiftWarning,
    WarningCode, Workbook,
};

use super::day_filter::filter_for_day;
use super::parsing::parse_record;
use super::shift_calculator::compute_shift;

/// Groups punches by person, keeping first-seen person order and row
/// order within each person.
fn group_by_person(punches: Vec<Punch>) -> Vec<(String, Vec<Punch>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Punch>)> = Vec::new();

    for punch in punches {
        match index.get(&punch.person) {
            Some(&i) => groups[i].1.push(punch),
            None => {
                index.insert(punch.person.clone(), groups.len());
                groups.push((punch.person.clone(), vec![punch]));
            }
        }
    }

    groups
}

/// Distinct calendar dates in first-seen order.
fn working_dates(punches: &[Punch]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for punch in punches {
        let date = punch.date();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates
}

fn is_time_ordered(slice: &[Punch]) -> bool {
    slice.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}

/// Summarises one day slice under the configured policies.
fn summarize_slice(mut slice: Vec<Punch>, config: &EngineConfig) -> Option<ShiftSummary> {
    let unsorted = !is_time_ordered(&slice);
    if unsorted && config.sort_by_timestamp() {
        slice.sort_by_key(|p| p.timestamp);
    }

    let mut summary = compute_shift(&slice)?;

    if unsorted {
        let message = if config.sort_by_timestamp() {
            "Punches were out of time order and have been sorted"
        } else {
            "Punches are out of time order and were paired in row order"
        };
        let severity = if config.sort_by_timestamp() {
            Severity::Low
        } else {
            Severity::High
        };
        summary
            .warnings
            .push(ShiftWarning::new(WarningCode::UnsortedPunches, message, severity));
    }

    if summary.net_duration < Duration::zero()
        && config.negative_net_policy() == NegativeNetPolicy::Clamp
    {
        warn!(
            person = %summary.person,
            date = %summary.date,
            net_seconds = summary.net_duration.num_seconds(),
            "Clamping negative net duration to zero"
        );
        summary.net_duration = Duration::zero();
    }

    Some(summary)
}

/// Summarises one sheet of punch rows.
///
/// Every row is parsed first; the first malformed date or time aborts the
/// sheet with `InvalidDateFormat` or `InvalidTimeFormat`. Summaries come
/// out grouped by person in first-seen order and, within a person, by
/// date in first-seen order. Days without punches produce no summary.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::summarize_sheet;
/// use shift_hours::config::EngineConfig;
/// use shift_hours::models::PunchRecord;
///
/// let row = |name: &str, date: &str, time: &str, io: &str| PunchRecord {
///     name: name.into(),
///     date: date.into(),
///     punch_time: time.into(),
///     io_type: io.into(),
/// };
///
/// let summaries = summarize_sheet(
///     &[
///         row("Alice", "15/01/2024", "09:00:00", "IN"),
///         row("Bob", "15/01/2024", "08:00:00", "IN"),
///         row("Alice", "15/01/2024", "17:00:00", "OUT"),
///         row("Bob", "15/01/2024", "16:00:00", "OUT"),
///     ],
///     &EngineConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(summaries.len(), 2);
/// assert_eq!(summaries[0].person, "Alice");
/// assert_eq!(summaries[1].person, "Bob");
/// ```
pub fn summarize_sheet(
    records: &[PunchRecord],
    config: &EngineConfig,
) -> EngineResult<Vec<ShiftSummary>> {
    let punches = records
        .iter()
        .map(parse_record)
        .collect::<EngineResult<Vec<_>>>()?;

    let mut summaries = Vec::new();

    for (person, person_punches) in group_by_person(punches) {
        for date in working_dates(&person_punches) {
            let slice = filter_for_day(&person_punches, date);
            if slice.is_empty() {
                continue;
            }

            if let Some(summary) = summarize_slice(slice, config) {
                debug!(
                    person = %person,
                    date = %date,
                    gross_seconds = summary.gross_duration.num_seconds(),
                    break_seconds = summary.break_duration.num_seconds(),
                    warnings = summary.warnings.len(),
                    "Computed shift summary"
                );
                summaries.push(summary);
            }
        }
    }

    Ok(summaries)
}

/// Summarises every sheet of a workbook.
///
/// A sheet that fails to parse is reported as [`SheetOutcome::Failed`]
/// and does not affect the other sheets.
pub fn summarize_workbook(workbook: &Workbook, config: &EngineConfig) -> Vec<SheetSummaries> {
    workbook
        .sheets
        .iter()
        .map(|sheet| {
            info!(sheet = %sheet.name, rows = sheet.rows.len(), "Processing sheet");
            let outcome = match summarize_sheet(&sheet.rows, config) {
                Ok(summaries) => SheetOutcome::Completed(summaries),
                Err(err) => {
                    warn!(sheet = %sheet.name, error = %err, "Sheet processing aborted");
                    SheetOutcome::Failed { error: err }
                }
            };
            SheetSummaries {
                name: sheet.name.clone(),
                outcome,
            }
        })
        .collect()
}
