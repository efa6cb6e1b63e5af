//! Calculation logic for the Shift Hours Engine.
//!
//! This module contains punch row parsing, the day filter that slices a
//! person's punches to one calendar date, the shift calculator that pairs
//! IN/OUT punches into gross, break and net time, the orchestration that
//! walks sheets and workbooks, and duration formatting.

mod day_filter;
mod formatting;
mod orchestration;
mod parsing;
mod shift_calculator;

pub use day_filter::{day_bounds, filter_for_day, filter_records_for_day};
pub use formatting::{duration_to_hours, format_duration};
pub use orchestration::{summarize_sheet, summarize_workbook};
pub use parsing::{DATE_FORMAT, TIME_FORMAT, parse_date, parse_record, parse_time, parse_timestamp};
pub use shift_calculator::{ShiftAccumulator, compute_shift};
