//! Relative-time formatting ("3 hours ago").

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 52 * WEEK;

/// Format the time elapsed between `then` and `now`.
///
/// Every bucket boundary is exclusive: exactly 60 seconds is "1 minute ago".
/// Anything under one second, including timestamps in the future, is
/// "just now".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).num_seconds();

    let (count, unit) = match elapsed {
        s if s < 1 => return "just now".to_string(),
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn ago(seconds: i64) -> String {
        let now = Utc::now();
        format_relative(now - TimeDelta::seconds(seconds), now)
    }

    #[test]
    fn test_non_positive_is_just_now() {
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(-30), "just now");
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ago(1), "1 second ago");
        assert_eq!(ago(59), "59 seconds ago");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(HOUR - 1), "59 minutes ago");
        assert_eq!(ago(HOUR), "1 hour ago");
        assert_eq!(ago(DAY), "1 day ago");
        assert_eq!(ago(WEEK - 1), "6 days ago");
        assert_eq!(ago(WEEK), "1 week ago");
        assert_eq!(ago(MONTH - 1), "4 weeks ago");
        assert_eq!(ago(MONTH), "1 month ago");
        assert_eq!(ago(YEAR - 1), "12 months ago");
        assert_eq!(ago(YEAR), "1 year ago");
        assert_eq!(ago(3 * YEAR + DAY), "3 years ago");
    }
}
