use chrono::{DateTime, Duration, Utc};

const MAX_LOCKOUT_SECS: u64 = 24 * 60 * 60;

/// Login lockout announced by the backend after too many failed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lockout {
    until: DateTime<Utc>,
}

impl Lockout {
    pub fn starting_at(now: DateTime<Utc>, remaining_seconds: u64) -> Self {
        let seconds = i64::try_from(remaining_seconds.min(MAX_LOCKOUT_SECS)).unwrap_or(0);
        Self {
            until: now + Duration::seconds(seconds),
        }
    }

    pub fn until(until: DateTime<Utc>) -> Self {
        Self { until }
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.until
    }

    /// Whole seconds left, rounded up; zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.until - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            u64::try_from((millis + 999) / 1_000).unwrap_or(0)
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining_at(now) > 0
    }
}

/// `M:SS` countdown text.
pub fn format_countdown(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0:00")]
    #[case(9, "0:09")]
    #[case(60, "1:00")]
    #[case(899, "14:59")]
    fn countdown_formatting(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_countdown(seconds), expected);
    }

    #[test]
    fn counts_down_to_zero() {
        let start = Utc::now();
        let lockout = Lockout::starting_at(start, 90);
        assert_eq!(lockout.remaining_at(start), 90);
        assert_eq!(lockout.remaining_at(start + Duration::milliseconds(500)), 90);
        assert_eq!(lockout.remaining_at(start + Duration::seconds(89)), 1);
        assert!(!lockout.is_active_at(start + Duration::seconds(90)));
        assert_eq!(lockout.remaining_at(start + Duration::seconds(500)), 0);
    }
}
