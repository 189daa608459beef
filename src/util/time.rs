//! Time formatting utilities.

use chrono::{DateTime, Utc};

/// Format how long ago `target` was, relative to now.
#[must_use]
pub fn format_relative_time(target: DateTime<Utc>) -> String {
    format_relative_time_at(target, Utc::now())
}

/// Format how long before `now` the `target` instant was.
///
/// Future instants and anything under a minute read as "just now".
#[must_use]
pub fn format_relative_time_at(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(target).num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }

    let days = hours / 24;
    format!("{days} day{} ago", plural(days))
}

const fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time_at(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_relative_time_at(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(format_relative_time_at(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_relative_time_at(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_relative_time_at(now - Duration::days(1), now), "1 day ago");
        assert_eq!(format_relative_time_at(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn future_reads_as_just_now() {
        let now = Utc::now();
        assert_eq!(format_relative_time_at(now + Duration::hours(2), now), "just now");
    }
}
