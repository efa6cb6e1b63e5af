//! Response types for the Shift Hours Engine API.
//!
//! This module defines the summary response bodies, the error response
//! structures and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{duration_to_hours, format_duration};
use crate::error::EngineError;
use crate::models::{SheetOutcome, SheetSummaries, ShiftSummary, ShiftWarning};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error reported for an aborted sheet.
    ///
    /// The code is the one the engine error maps to (e.g.
    /// `INVALID_TIME_FORMAT`); the details note that only this sheet was
    /// aborted.
    pub fn sheet_failed(error: &EngineError) -> Self {
        let ApiErrorResponse { error, .. } = error.clone().into();
        Self::with_details(
            error.code,
            error.message,
            "Processing of this sheet was aborted; other sheets are unaffected",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidDateFormat { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_FORMAT", message),
            },
            EngineError::InvalidTimeFormat { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_TIME_FORMAT", message),
            },
            EngineError::MissingColumn { column } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_COLUMN",
                    message,
                    format!("The uploaded sheet has no '{}' header", column),
                ),
            },
            EngineError::CsvError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_CSV", message),
            },
            EngineError::WorkbookError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_WORKBOOK", message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ExportError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

/// One shift summary as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The person the shift belongs to.
    pub person: String,
    /// First IN of the day.
    pub first_login: Option<NaiveDateTime>,
    /// Last OUT of the day.
    pub last_logout: Option<NaiveDateTime>,
    /// Gross duration in seconds.
    pub gross_seconds: i64,
    /// Break duration in seconds.
    pub break_seconds: i64,
    /// Net duration in seconds.
    pub net_seconds: i64,
    /// Gross duration in decimal hours.
    pub gross_hours: Decimal,
    /// Break duration in decimal hours.
    pub break_hours: Decimal,
    /// Net duration in decimal hours.
    pub net_hours: Decimal,
    /// Gross duration as "H hours, M minutes".
    pub gross_display: String,
    /// Break duration as "H hours, M minutes".
    pub break_display: String,
    /// Net duration as "H hours, M minutes".
    pub net_display: String,
    /// Anomalies tolerated for this day.
    pub warnings: Vec<ShiftWarning>,
}

impl From<&ShiftSummary> for SummaryRow {
    fn from(summary: &ShiftSummary) -> Self {
        SummaryRow {
            date: summary.date,
            person: summary.person.clone(),
            first_login: summary.first_login,
            last_logout: summary.last_logout,
            gross_seconds: summary.gross_duration.num_seconds(),
            break_seconds: summary.break_duration.num_seconds(),
            net_seconds: summary.net_duration.num_seconds(),
            gross_hours: duration_to_hours(summary.gross_duration),
            break_hours: duration_to_hours(summary.break_duration),
            net_hours: duration_to_hours(summary.net_duration),
            gross_display: format_duration(summary.gross_duration),
            break_display: format_duration(summary.break_duration),
            net_display: format_duration(summary.net_duration),
            warnings: summary.warnings.clone(),
        }
    }
}

/// The result of one sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetResponse {
    /// The source sheet name.
    pub name: String,
    /// Summaries, empty when the sheet failed.
    pub summaries: Vec<SummaryRow>,
    /// The error that aborted the sheet, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<&SheetSummaries> for SheetResponse {
    fn from(sheet: &SheetSummaries) -> Self {
        match &sheet.outcome {
            SheetOutcome::Completed(summaries) => SheetResponse {
                name: sheet.name.clone(),
                summaries: summaries.iter().map(Into::into).collect(),
                error: None,
            },
            SheetOutcome::Failed { error } => SheetResponse {
                name: sheet.name.clone(),
                summaries: vec![],
                error: Some(ApiError::sheet_failed(error)),
            },
        }
    }
}

/// Response body of the JSON summary endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Unique identifier of this batch.
    pub batch_id: Uuid,
    /// When the batch was processed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the summaries.
    pub engine_version: String,
    /// Per-sheet results, in workbook order.
    pub sheets: Vec<SheetResponse>,
}

impl SummaryResponse {
    /// Builds the response for a processed workbook.
    pub fn new(sheets: &[SheetSummaries]) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            sheets: sheets.iter().map(Into::into).collect(),
        }
    }
}

/// Response body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is up.
    pub status: String,
    /// The running engine version.
    pub engine_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_invalid_date_maps_to_bad_request() {
        let engine_error = EngineError::InvalidDateFormat {
            value: "2024-01-15".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_DATE_FORMAT");
        assert!(api_error.error.message.contains("2024-01-15"));
    }

    #[test]
    fn test_missing_column_has_details() {
        let engine_error = EngineError::MissingColumn {
            column: "Date".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "MISSING_COLUMN");
        assert!(api_error.error.details.unwrap().contains("'Date'"));
    }

    #[test]
    fn test_export_error_maps_to_server_error() {
        let engine_error = EngineError::ExportError {
            message: "disk full".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "EXPORT_ERROR");
    }

    #[test]
    fn test_summary_row_from_summary() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let summary = ShiftSummary {
            date,
            person: "Alice".to_string(),
            first_login: date.and_hms_opt(9, 0, 0),
            last_logout: date.and_hms_opt(17, 0, 0),
            gross_duration: Duration::hours(8),
            break_duration: Duration::minutes(45),
            net_duration: Duration::minutes(435),
            warnings: vec![],
        };

        let row = SummaryRow::from(&summary);
        assert_eq!(row.gross_seconds, 28800);
        assert_eq!(row.break_hours, Decimal::new(75, 2));
        assert_eq!(row.net_hours, Decimal::new(725, 2));
        assert_eq!(row.net_display, "7 hours, 15 minutes");
    }

    #[test]
    fn test_failed_sheet_response_has_error() {
        let sheet = SheetSummaries {
            name: "Broken".to_string(),
            outcome: SheetOutcome::Failed {
                error: EngineError::InvalidTimeFormat {
                    value: "9am".to_string(),
                },
            },
        };

        let response = SheetResponse::from(&sheet);
        assert!(response.summaries.is_empty());
        let error = response.error.unwrap();
        assert_eq!(error.code, "INVALID_TIME_FORMAT");
        assert_eq!(error.message, "Invalid time '9am': expected HH:MM:SS");
        assert!(error.details.unwrap().contains("this sheet"));
    }

    #[test]
    fn test_failed_sheet_response_keeps_date_error_code() {
        let sheet = SheetSummaries {
            name: "Broken".to_string(),
            outcome: SheetOutcome::Failed {
                error: EngineError::InvalidDateFormat {
                    value: "2024-01-15".to_string(),
                },
            },
        };

        let error = SheetResponse::from(&sheet).error.unwrap();
        assert_eq!(error.code, "INVALID_DATE_FORMAT");
    }

    #[test]
    fn test_workbook_error_maps_to_bad_request() {
        let engine_error = EngineError::WorkbookError {
            message: "invalid zip header".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_WORKBOOK");
    }
}
