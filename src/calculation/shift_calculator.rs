//! Shift calculation for one person's day.
//!
//! The calculator scans a day slice strictly in the order given and pairs
//! IN and OUT punches with a small state machine, [`ShiftAccumulator`],
//! threaded through a left fold.

use chrono::{Duration, NaiveDateTime};

use crate::models::{Direction, Punch, Severity, ShiftSummary, ShiftWarning, WarningCode};

/// Scan state while folding over a day slice.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::ShiftAccumulator;
/// use shift_hours::models::{Direction, Punch};
/// use chrono::{Duration, NaiveDateTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |s: &str, direction| Punch { person: "Alice".into(), timestamp: at(s), direction };
///
/// let state = [
///     punch("2024-01-15 09:00:00", Direction::In),
///     punch("2024-01-15 12:00:00", Direction::Out),
///     punch("2024-01-15 12:30:00", Direction::In),
/// ]
/// .iter()
/// .fold(ShiftAccumulator::new(), ShiftAccumulator::apply);
///
/// assert_eq!(state.first_login, Some(at("2024-01-15 09:00:00")));
/// assert_eq!(state.accumulated_break, Duration::minutes(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAccumulator {
    /// Set once, on the first IN.
    pub first_login: Option<NaiveDateTime>,
    /// Updated on every OUT that follows an open IN.
    pub last_logout: Option<NaiveDateTime>,
    /// The most recent IN.
    pub in_time: Option<NaiveDateTime>,
    /// The most recent accepted OUT.
    pub prev_out_time: Option<NaiveDateTime>,
    /// Sum of OUT-to-IN gaps so far.
    pub accumulated_break: Duration,
    warnings: Vec<ShiftWarning>,
}

impl Default for ShiftAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftAccumulator {
    /// Creates the empty scan state.
    pub fn new() -> Self {
        Self {
            first_login: None,
            last_logout: None,
            in_time: None,
            prev_out_time: None,
            accumulated_break: Duration::zero(),
            warnings: Vec::new(),
        }
    }

    /// Applies one punch. Signature fits `Iterator::fold`.
    pub fn apply(mut self, punch: &Punch) -> Self {
        let ts = punch.timestamp;
        match punch.direction {
            Direction::In => {
                if self.first_login.is_none() {
                    self.first_login = Some(ts);
                }
                self.in_time = Some(ts);
                if let Some(prev_out) = self.prev_out_time {
                    if prev_out < ts {
                        self.accumulated_break += ts - prev_out;
                    }
                }
            }
            Direction::Out => {
                if self.in_time.is_some() {
                    self.last_logout = Some(ts);
                    self.prev_out_time = Some(ts);
                } else {
                    self.warnings.push(ShiftWarning::new(
                        WarningCode::UnmatchedOut,
                        format!("OUT at {} has no preceding IN and was ignored", ts),
                        Severity::Low,
                    ));
                }
            }
            Direction::Unknown => {
                self.warnings.push(ShiftWarning::new(
                    WarningCode::UnknownDirection,
                    format!("Punch at {} is neither IN nor OUT and was ignored", ts),
                    Severity::Medium,
                ));
            }
        }
        self
    }

    /// Last logout minus first login, or zero without a complete pair.
    pub fn gross_duration(&self) -> Duration {
        match (self.first_login, self.last_logout) {
            (Some(login), Some(logout)) => logout - login,
            _ => Duration::zero(),
        }
    }

    /// Finalizes the scan, taking person and date from `first`.
    pub fn finish(mut self, first: &Punch) -> ShiftSummary {
        if self.first_login.is_none() {
            self.warnings.push(ShiftWarning::new(
                WarningCode::NoLogin,
                "No IN punch recorded for the day",
                Severity::High,
            ));
        }

        if let Some(in_time) = self.in_time {
            let closed = self.last_logout.is_some_and(|out| out >= in_time);
            if !closed {
                self.warnings.push(ShiftWarning::new(
                    WarningCode::MissingOut,
                    format!("IN at {} has no matching OUT", in_time),
                    Severity::Medium,
                ));
            }
        }

        let gross_duration = self.gross_duration();
        let net_duration = gross_duration - self.accumulated_break;
        if net_duration < Duration::zero() {
            self.warnings.push(ShiftWarning::new(
                WarningCode::NegativeNetDuration,
                format!(
                    "Net time is {}s: login-to-logout time of {}s less {}s of breaks",
                    net_duration.num_seconds(),
                    gross_duration.num_seconds(),
                    self.accumulated_break.num_seconds()
                ),
                Severity::High,
            ));
        }

        ShiftSummary {
            date: first.date(),
            person: first.person.clone(),
            first_login: self.first_login,
            last_logout: self.last_logout,
            gross_duration,
            break_duration: self.accumulated_break,
            net_duration,
            warnings: self.warnings,
        }
    }
}

/// Computes the summary of one person's day.
///
/// `slice` must already be restricted to one person and one date. It is
/// scanned in the given order; sorting is the caller's decision. Returns
/// `None` only for an empty slice, which has no person or date to report.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::compute_shift;
/// use shift_hours::models::{Direction, Punch};
/// use chrono::{Duration, NaiveDateTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |s: &str, direction| Punch { person: "Alice".into(), timestamp: at(s), direction };
///
/// let summary = compute_shift(&[
///     punch("2024-01-15 09:00:00", Direction::In),
///     punch("2024-01-15 12:00:00", Direction::Out),
///     punch("2024-01-15 13:00:00", Direction::In),
///     punch("2024-01-15 17:00:00", Direction::Out),
/// ])
/// .unwrap();
///
/// assert_eq!(summary.gross_duration, Duration::hours(8));
/// assert_eq!(summary.break_duration, Duration::hours(1));
/// assert_eq!(summary.net_duration, Duration::hours(7));
/// ```
pub fn compute_shift(slice: &[Punch]) -> Option<ShiftSummary> {
    let first = slice.first()?;
    let state = slice
        .iter()
        .fold(ShiftAccumulator::new(), ShiftAccumulator::apply);
    Some(state.finish(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2024-01-15 {}", time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn p(time: &str, direction: Direction) -> Punch {
        Punch {
            person: "Alice".to_string(),
            timestamp: at(time),
            direction,
        }
    }

    use Direction::{In, Out, Unknown};

    /// SC-001: two sessions separated by a lunch break
    #[test]
    fn test_two_sessions_with_lunch_break() {
        let summary = compute_shift(&[
            p("09:00:00", In),
            p("12:00:00", Out),
            p("13:00:00", In),
            p("17:00:00", Out),
        ])
        .unwrap();

        assert_eq!(summary.first_login, Some(at("09:00:00")));
        assert_eq!(summary.last_logout, Some(at("17:00:00")));
        assert_eq!(summary.gross_duration, Duration::hours(8));
        assert_eq!(summary.break_duration, Duration::hours(1));
        assert_eq!(summary.net_duration, Duration::hours(7));
        assert!(!summary.has_warnings());
    }

    /// SC-002: leading OUT without an open IN is ignored
    #[test]
    fn test_leading_unmatched_out_is_ignored() {
        let summary = compute_shift(&[p("08:00:00", Out), p("09:00:00", In), p("17:00:00", Out)])
            .unwrap();

        assert_eq!(summary.first_login, Some(at("09:00:00")));
        assert_eq!(summary.last_logout, Some(at("17:00:00")));
        assert_eq!(summary.break_duration, Duration::zero());
        assert_eq!(summary.gross_duration, Duration::hours(8));
        assert_eq!(summary.net_duration, Duration::hours(8));
        assert!(summary.has_warning(WarningCode::UnmatchedOut));
    }

    /// SC-003: double IN keeps the first login
    #[test]
    fn test_double_in_keeps_first_login() {
        let state = [p("09:00:00", In), p("10:00:00", In), p("17:00:00", Out)]
            .iter()
            .fold(ShiftAccumulator::new(), ShiftAccumulator::apply);

        assert_eq!(state.first_login, Some(at("09:00:00")));
        assert_eq!(state.in_time, Some(at("10:00:00")));
        assert_eq!(state.accumulated_break, Duration::zero());
        assert_eq!(state.gross_duration(), Duration::hours(8));
    }

    /// SC-004: no IN at all gives an all-zero summary
    #[test]
    fn test_no_in_punches_gives_zero_durations() {
        let summary = compute_shift(&[p("08:00:00", Out), p("17:00:00", Out)]).unwrap();

        assert_eq!(summary.gross_duration, Duration::zero());
        assert_eq!(summary.break_duration, Duration::zero());
        assert_eq!(summary.net_duration, Duration::zero());
        assert_eq!(summary.first_login, None);
        assert_eq!(summary.last_logout, None);
        assert!(summary.has_warning(WarningCode::NoLogin));
    }

    /// SC-005: IN without any OUT has no gross time
    #[test]
    fn test_single_in_without_out() {
        let summary = compute_shift(&[p("09:00:00", In)]).unwrap();

        assert_eq!(summary.first_login, Some(at("09:00:00")));
        assert_eq!(summary.last_logout, None);
        assert_eq!(summary.gross_duration, Duration::zero());
        assert!(summary.has_warning(WarningCode::MissingOut));
    }

    /// SC-006: trailing IN after the last OUT adds a break but no gross time
    #[test]
    fn test_trailing_in_counts_break_and_flags_missing_out() {
        let summary = compute_shift(&[p("09:00:00", In), p("12:00:00", Out), p("13:00:00", In)])
            .unwrap();

        assert_eq!(summary.gross_duration, Duration::hours(3));
        assert_eq!(summary.break_duration, Duration::hours(1));
        assert_eq!(summary.net_duration, Duration::hours(2));
        assert!(summary.has_warning(WarningCode::MissingOut));
    }

    #[test]
    fn test_repeated_in_after_out_measures_from_same_out() {
        // prev_out_time is not cleared by an IN, so a second IN measures
        // its gap from the same OUT again.
        let summary = compute_shift(&[
            p("09:00:00", In),
            p("12:00:00", Out),
            p("13:00:00", In),
            p("14:00:00", In),
            p("17:00:00", Out),
        ])
        .unwrap();

        assert_eq!(summary.break_duration, Duration::hours(3));
        assert_eq!(summary.gross_duration, Duration::hours(8));
        assert_eq!(summary.net_duration, Duration::hours(5));
    }

    #[test]
    fn test_out_of_order_slice_can_go_negative() {
        // Scanned as given: IN 13:00, OUT 17:00, IN 09:00 gives no break
        // (OUT is later than IN), then OUT 12:00 moves the logout back.
        let summary = compute_shift(&[
            p("13:00:00", In),
            p("17:00:00", Out),
            p("09:00:00", In),
            p("12:00:00", Out),
        ])
        .unwrap();

        assert_eq!(summary.first_login, Some(at("13:00:00")));
        assert_eq!(summary.last_logout, Some(at("12:00:00")));
        assert_eq!(summary.gross_duration, Duration::hours(-1));
        assert_eq!(summary.net_duration, Duration::hours(-1));

        let warning = summary
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::NegativeNetDuration)
            .unwrap();
        assert_eq!(
            warning.message,
            "Net time is -3600s: login-to-logout time of -3600s less 0s of breaks"
        );
    }

    #[test]
    fn test_unknown_direction_is_ignored() {
        let summary = compute_shift(&[
            p("09:00:00", In),
            p("12:00:00", Unknown),
            p("17:00:00", Out),
        ])
        .unwrap();

        assert_eq!(summary.gross_duration, Duration::hours(8));
        assert_eq!(summary.break_duration, Duration::zero());
        assert!(summary.has_warning(WarningCode::UnknownDirection));
    }

    #[test]
    fn test_out_equal_to_in_adds_no_break() {
        let summary = compute_shift(&[
            p("09:00:00", In),
            p("12:00:00", Out),
            p("12:00:00", In),
            p("17:00:00", Out),
        ])
        .unwrap();

        assert_eq!(summary.break_duration, Duration::zero());
        assert_eq!(summary.net_duration, Duration::hours(8));
    }

    #[test]
    fn test_person_and_date_copied_from_first_punch() {
        let mut first = p("09:00:00", In);
        first.person = "Bob".to_string();
        let summary = compute_shift(&[first, p("17:00:00", Out)]).unwrap();

        assert_eq!(summary.person, "Bob");
        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_empty_slice_returns_none() {
        assert!(compute_shift(&[]).is_none());
    }

    #[test]
    fn test_seconds_precision_is_kept() {
        let summary = compute_shift(&[p("09:00:15", In), p("17:00:45", Out)]).unwrap();
        assert_eq!(
            summary.gross_duration,
            Duration::hours(8) + Duration::seconds(30)
        );
    }
}
