//! Shift Hours Engine
//!
//! This crate computes per-person, per-day work hour summaries from raw
//! time-clock punch records: first login, last logout, break time between
//! an OUT and the next IN, and net hours worked.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod spreadsheet;
