//! Shift summary models for the Shift Hours Engine.
//!
//! This module contains the [`ShiftSummary`] produced for every
//! (person, date) pair and the [`ShiftWarning`]s that record anomalies the
//! calculator tolerated instead of rejecting.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifies the kind of anomaly found while summarising a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// An OUT punch arrived with no open IN and was ignored.
    UnmatchedOut,
    /// The last IN of the day has no OUT after it.
    MissingOut,
    /// The slice holds no IN punch at all.
    NoLogin,
    /// A punch direction was neither IN nor OUT.
    UnknownDirection,
    /// Punches were not in timestamp order.
    UnsortedPunches,
    /// Net time came out below zero.
    NegativeNetDuration,
}

/// How much attention a warning deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational, totals are still trustworthy.
    Low,
    /// Totals may under- or over-count.
    Medium,
    /// Totals are very likely wrong.
    High,
}

/// A warning generated while computing a shift summary.
///
/// # Example
///
/// ```
/// use shift_hours::models::{Severity, ShiftWarning, WarningCode};
///
/// let warning = ShiftWarning::new(
///     WarningCode::UnmatchedOut,
///     "OUT at 08:00:00 has no preceding IN",
///     Severity::Low,
/// );
/// assert_eq!(warning.code, WarningCode::UnmatchedOut);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWarning {
    /// A code identifying the type of warning.
    pub code: WarningCode,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: Severity,
}

impl ShiftWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code,
            message: message.into(),
            severity,
        }
    }
}

/// The summary of one person's working day.
///
/// Created once per non-empty day slice and never modified afterwards.
///
/// # Example
///
/// ```
/// use shift_hours::models::ShiftSummary;
/// use chrono::{Duration, NaiveDate};
///
/// let summary = ShiftSummary {
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     person: "Alice".to_string(),
///     first_login: None,
///     last_logout: None,
///     gross_duration: Duration::zero(),
///     break_duration: Duration::zero(),
///     net_duration: Duration::zero(),
///     warnings: vec![],
/// };
/// assert!(!summary.has_warnings());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The person the shift belongs to.
    pub person: String,
    /// Timestamp of the first IN of the day.
    pub first_login: Option<NaiveDateTime>,
    /// Timestamp of the last OUT that closed an open IN.
    pub last_logout: Option<NaiveDateTime>,
    /// Last logout minus first login, breaks included.
    #[serde(with = "duration_seconds")]
    pub gross_duration: Duration,
    /// Sum of the gaps between an OUT and the next IN.
    #[serde(with = "duration_seconds")]
    pub break_duration: Duration,
    /// Gross minus break; may be negative unless clamped.
    #[serde(with = "duration_seconds")]
    pub net_duration: Duration,
    /// Anomalies tolerated while computing this summary.
    #[serde(default)]
    pub warnings: Vec<ShiftWarning>,
}

impl ShiftSummary {
    /// Returns true when any warning was recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns true when a warning with the given code was recorded.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Serializes a [`Duration`] as a whole number of seconds.
pub mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Writes the duration as signed seconds.
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    /// Reads signed seconds back into a duration.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ShiftSummary {
        ShiftSummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            person: "Alice".to_string(),
            first_login: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0),
            last_logout: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(17, 0, 0),
            gross_duration: Duration::hours(8),
            break_duration: Duration::hours(1),
            net_duration: Duration::hours(7),
            warnings: vec![],
        }
    }

    #[test]
    fn test_summary_serializes_durations_as_seconds() {
        let json = serde_json::to_value(sample_summary()).unwrap();
        assert_eq!(json["gross_duration"], 28800);
        assert_eq!(json["break_duration"], 3600);
        assert_eq!(json["net_duration"], 25200);
        assert_eq!(json["first_login"], "2024-01-15T09:00:00");
    }

    #[test]
    fn test_summary_roundtrip_preserves_negative_net() {
        let mut summary = sample_summary();
        summary.net_duration = Duration::minutes(-30);

        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: ShiftSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.net_duration, Duration::minutes(-30));
    }

    #[test]
    fn test_warning_code_serialization() {
        let warning = ShiftWarning::new(WarningCode::MissingOut, "no OUT", Severity::Medium);
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"MISSING_OUT\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_has_warning_by_code() {
        let mut summary = sample_summary();
        assert!(!summary.has_warnings());

        summary.warnings.push(ShiftWarning::new(
            WarningCode::NoLogin,
            "no IN",
            Severity::High,
        ));
        assert!(summary.has_warning(WarningCode::NoLogin));
        assert!(!summary.has_warning(WarningCode::MissingOut));
    }
}
