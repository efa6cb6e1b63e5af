//! Duration rendering for reports and exports.

use chrono::Duration;
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: i64 = 3600;

/// Renders a duration as `"H hours, M minutes"`.
///
/// Seconds are dropped. Hours use floor division, so a negative duration
/// keeps a non-negative minute part: -30 minutes renders as
/// `"-1 hours, 30 minutes"`.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::minutes(450)), "7 hours, 30 minutes");
/// assert_eq!(format_duration(Duration::zero()), "0 hours, 0 minutes");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();
    let hours = total_seconds.div_euclid(SECONDS_PER_HOUR);
    let minutes = total_seconds.rem_euclid(SECONDS_PER_HOUR) / 60;
    format!("{} hours, {} minutes", hours, minutes)
}

/// Converts a duration to decimal hours rounded to two places.
///
/// # Example
///
/// ```
/// use shift_hours::calculation::duration_to_hours;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_to_hours(Duration::minutes(450)), Decimal::new(750, 2));
/// ```
pub fn duration_to_hours(duration: Duration) -> Decimal {
    (Decimal::from(duration.num_seconds()) / Decimal::from(SECONDS_PER_HOUR)).round_dp(2)
}
