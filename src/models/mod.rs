//! Core data models for the Shift Hours Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod punch;
mod shift_summary;
mod workbook;

pub use punch::{Direction, Punch, PunchRecord};
pub use shift_summary::{Severity, ShiftSummary, ShiftWarning, WarningCode, duration_seconds};
pub use workbook::{Sheet, SheetOutcome, SheetSummaries, Workbook};
