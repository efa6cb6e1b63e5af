//! Spreadsheet input and output.
//!
//! Reads punch sheets from CSV and punch workbooks from XLSX, and writes
//! shift summaries to XLSX workbooks and CSV tables.

mod csv_import;
mod export;
mod xlsx_import;

pub use csv_import::read_punch_csv;
pub use xlsx_import::read_punch_workbook;
pub use export::{SUMMARY_HEADERS, summaries_to_csv, summaries_to_xlsx, summary_row};
