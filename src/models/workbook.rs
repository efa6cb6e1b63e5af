//! Workbook and sheet models.
//!
//! A workbook is an ordered set of named punch sheets (per department,
//! per month). Each sheet is summarised independently.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::{PunchRecord, ShiftSummary};

/// One named sheet of punch rows, in original row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// The sheet name.
    pub name: String,
    /// The punch rows.
    #[serde(default)]
    pub rows: Vec<PunchRecord>,
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    /// The sheets, in workbook order.
    pub sheets: Vec<Sheet>,
}

/// What happened when a sheet was summarised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    /// All rows parsed; one summary per non-empty (person, date) slice.
    Completed(Vec<ShiftSummary>),
    /// Processing of this sheet was aborted.
    Failed {
        /// The error that aborted the sheet.
        error: EngineError,
    },
}

/// The result of summarising one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummaries {
    /// Name of the source sheet.
    pub name: String,
    /// Summaries or the error that aborted the sheet.
    pub outcome: SheetOutcome,
}

impl SheetSummaries {
    /// Returns the summaries of a completed sheet, or an empty slice.
    pub fn summaries(&self) -> &[ShiftSummary] {
        match &self.outcome {
            SheetOutcome::Completed(summaries) => summaries,
            SheetOutcome::Failed { .. } => &[],
        }
    }

    /// Returns the error of a failed sheet.
    pub fn error(&self) -> Option<&EngineError> {
        match &self.outcome {
            SheetOutcome::Completed(_) => None,
            SheetOutcome::Failed { error } => Some(error),
        }
    }
}
