//! Request types for the Shift Hours Engine API.
//!
//! This module defines the JSON request structures for the `/summaries`
//! endpoints and the query parameters of the CSV upload endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{PunchRecord, Sheet, Workbook};

/// Request body for the `/summaries`, `/summaries/xlsx` and
/// `/summaries/csv` endpoints: a workbook of punch sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// The punch sheets, in workbook order.
    pub sheets: Vec<SheetRequest>,
}

/// One punch sheet in a summary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRequest {
    /// The sheet name.
    pub name: String,
    /// The punch rows, in original order.
    #[serde(default)]
    pub rows: Vec<PunchRowRequest>,
}

/// One punch row in a summary request.
///
/// Field names also accept the spreadsheet headers (`Name`, `Date`,
/// `Punch Time`, `I/O Type`) so rows exported straight from a sheet can be
/// posted unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRowRequest {
    /// The person's name.
    #[serde(alias = "Name")]
    pub name: String,
    /// The punch date as `DD/MM/YYYY`.
    #[serde(alias = "Date")]
    pub date: String,
    /// The punch time as `HH:MM:SS`.
    #[serde(alias = "Punch Time")]
    pub punch_time: String,
    /// `IN` or `OUT`.
    #[serde(alias = "I/O Type")]
    pub io_type: String,
}

/// Query parameters of `/summaries/upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadQuery {
    /// Name reported for the uploaded sheet.
    #[serde(default)]
    pub sheet: Option<String>,
}

impl UploadQuery {
    /// The sheet name, defaulting to `Sheet1`.
    pub fn sheet_name(&self) -> String {
        self.sheet.clone().unwrap_or_else(|| "Sheet1".to_string())
    }
}

impl From<PunchRowRequest> for PunchRecord {
    fn from(req: PunchRowRequest) -> Self {
        PunchRecord {
            name: req.name,
            date: req.date,
            punch_time: req.punch_time,
            io_type: req.io_type,
        }
    }
}

impl From<SheetRequest> for Sheet {
    fn from(req: SheetRequest) -> Self {
        Sheet {
            name: req.name,
            rows: req.rows.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<SummaryRequest> for Workbook {
    fn from(req: SummaryRequest) -> Self {
        Workbook {
            sheets: req.sheets.into_iter().map(Into::into).collect(),
        }
    }
}
