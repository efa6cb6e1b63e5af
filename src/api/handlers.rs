//! HTTP request handlers for the Shift Hours Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::summarize_workbook;
use crate::models::{Sheet, SheetSummaries, Workbook};
use crate::spreadsheet::{
    read_punch_csv, read_punch_workbook, summaries_to_csv, summaries_to_xlsx,
};

use super::request::{SummaryRequest, UploadQuery};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, SummaryResponse};
use super::state::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLSX_DISPOSITION: &str = "attachment; filename=\"Processed_Shift_Data.xlsx\"";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"Processed_Shift_Data.csv\"";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/summaries", post(summaries_handler))
        .route("/summaries/upload", post(upload_handler))
        .route("/summaries/workbook", post(workbook_handler))
        .route("/summaries/workbook/xlsx", post(workbook_xlsx_handler))
        .route("/summaries/xlsx", post(xlsx_handler))
        .route("/summaries/csv", post(csv_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Turns a JSON extraction failure into a 400 response.
fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn error_response(err: ApiErrorResponse) -> Response {
    (
        err.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(err.error),
    )
        .into_response()
}

/// Summarises a workbook and logs the outcome.
fn process_workbook(
    state: &AppState,
    workbook: &Workbook,
    correlation_id: Uuid,
) -> Vec<SheetSummaries> {
    let start_time = Instant::now();
    let results = summarize_workbook(workbook, state.engine_config());

    let summaries: usize = results.iter().map(|s| s.summaries().len()).sum();
    let failed = results.iter().filter(|s| s.error().is_some()).count();
    info!(
        correlation_id = %correlation_id,
        sheets = results.len(),
        failed_sheets = failed,
        summaries,
        duration_us = start_time.elapsed().as_micros(),
        "Workbook processed"
    );

    results
}

fn xlsx_download(results: &[SheetSummaries], correlation_id: Uuid) -> Response {
    match summaries_to_xlsx(results) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, XLSX_DISPOSITION),
            ],
            bytes,
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "XLSX export failed");
            error_response(err.into())
        }
    }
}

/// Reads an uploaded XLSX workbook, or explains why it could not be read.
fn import_workbook(
    state: &AppState,
    body: &Bytes,
    correlation_id: Uuid,
) -> Result<Workbook, Response> {
    read_punch_workbook(body, state.config().columns()).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Workbook import failed");
        error_response(err.into())
    })
}

fn json_summary_response(results: &[SheetSummaries]) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(SummaryResponse::new(results)),
    )
        .into_response()
}

/// Handler for POST /summaries.
///
/// Accepts a JSON workbook and returns per-sheet summaries. A sheet with
/// malformed rows is reported with an error; the request still succeeds.
async fn summaries_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let workbook: Workbook = request.into();
    let results = process_workbook(&state, &workbook, correlation_id);
    json_summary_response(&results)
}

/// Handler for POST /summaries/upload.
///
/// Accepts one punch sheet as CSV text and returns its summaries.
async fn upload_handler(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let sheet_name = query.sheet_name();
    info!(
        correlation_id = %correlation_id,
        sheet = %sheet_name,
        bytes = body.len(),
        "Processing CSV upload"
    );

    let rows = match read_punch_csv(&body[..], state.config().columns()) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "CSV import failed");
            return error_response(err.into());
        }
    };

    let workbook = Workbook {
        sheets: vec![Sheet {
            name: sheet_name,
            rows,
        }],
    };
    let results = process_workbook(&state, &workbook, correlation_id);
    json_summary_response(&results)
}

/// Handler for POST /summaries/xlsx.
///
/// Accepts a JSON workbook and returns an XLSX download with one
/// `Results_{sheet}` worksheet per summarised sheet.
async fn xlsx_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing XLSX export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let workbook: Workbook = request.into();
    let results = process_workbook(&state, &workbook, correlation_id);
    xlsx_download(&results, correlation_id)
}

/// Handler for POST /summaries/workbook.
///
/// Accepts an XLSX punch workbook and returns per-sheet summaries as JSON.
/// Worksheets are processed in workbook order.
async fn workbook_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing workbook upload"
    );

    let workbook = match import_workbook(&state, &body, correlation_id) {
        Ok(workbook) => workbook,
        Err(response) => return response,
    };
    let results = process_workbook(&state, &workbook, correlation_id);
    json_summary_response(&results)
}

/// Handler for POST /summaries/workbook/xlsx.
///
/// Accepts an XLSX punch workbook and returns the processed XLSX download.
async fn workbook_xlsx_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing workbook export request"
    );

    let workbook = match import_workbook(&state, &body, correlation_id) {
        Ok(workbook) => workbook,
        Err(response) => return response,
    };
    let results = process_workbook(&state, &workbook, correlation_id);
    xlsx_download(&results, correlation_id)
}

/// Handler for POST /summaries/csv.
///
/// Accepts a JSON workbook and returns all summaries as one CSV download.
async fn csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let workbook: Workbook = request.into();
    let results = process_workbook(&state, &workbook, correlation_id);
    match summaries_to_csv(&results) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "CSV export failed");
            error_response(err.into())
        }
    }
}
