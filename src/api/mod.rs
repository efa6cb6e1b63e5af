//! HTTP API module for the Shift Hours Engine.
//!
//! This module provides the REST endpoints that accept punch workbooks,
//! as JSON, as an uploaded XLSX workbook or as a single CSV sheet, and
//! return shift summaries as JSON, XLSX or CSV.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PunchRowRequest, SheetRequest, SummaryRequest, UploadQuery};
pub use response::{
    ApiError, HealthResponse, SheetResponse, SummaryResponse, SummaryRow,
};
pub use state::AppState;
