//! Error types for the Shift Hours Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while parsing punches, loading
//! configuration and exporting summaries. The shift calculator itself has
//! no failure path and never produces one of these errors.

use thiserror::Error;

/// The main error type for the Shift Hours Engine.
///
/// # Example
///
/// ```
/// use shift_hours::error::EngineError;
///
/// let error = EngineError::InvalidDateFormat {
///     value: "2024-01-15".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid date '2024-01-15': expected DD/MM/YYYY"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A punch date could not be parsed as `DD/MM/YYYY`.
    #[error("Invalid date '{value}': expected DD/MM/YYYY")]
    InvalidDateFormat {
        /// The offending date text.
        value: String,
    },

    /// A punch time could not be parsed as `HH:MM:SS`.
    #[error("Invalid time '{value}': expected HH:MM:SS")]
    InvalidTimeFormat {
        /// The offending time text.
        value: String,
    },

    /// A required column is absent from an imported sheet.
    #[error("Missing column: {column}")]
    MissingColumn {
        /// The header name that was expected.
        column: String,
    },

    /// An imported CSV sheet could not be read.
    #[error("CSV error: {message}")]
    CsvError {
        /// A description of the CSV error.
        message: String,
    },

    /// An uploaded XLSX workbook could not be read.
    #[error("Workbook error: {message}")]
    WorkbookError {
        /// A description of the workbook error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of what is wrong.
        message: String,
    },

    /// Summaries could not be written to the requested format.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::CsvError {
            message: error.to_string(),
        }
    }
}

impl From<calamine::XlsxError> for EngineError {
    fn from(error: calamine::XlsxError) -> Self {
        EngineError::WorkbookError {
            message: error.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for EngineError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
