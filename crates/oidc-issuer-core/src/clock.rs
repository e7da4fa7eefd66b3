//! Time source for token timestamps.
//!
//! The claims builders sample the clock once per call so `nbf`, `iat` and
//! `exp` are derived from the same instant.

use time::OffsetDateTime;

/// Supplies the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// The system clock (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl FixedClock {
    /// Creates a clock fixed at a Unix timestamp.
    ///
    /// Out-of-range timestamps fall back to the Unix epoch.
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Self {
        Self(OffsetDateTime::from_unix_timestamp(timestamp).unwrap_or(OffsetDateTime::UNIX_EPOCH))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_unix_timestamp(1_700_000_000);
        assert_eq!(clock.now().unix_timestamp(), 1_700_000_000);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now().unix_timestamp();
        assert!(now > 1_700_000_000);
    }
}
