//! Clock abstraction and date helpers

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::Result;

/// A simple clock abstraction for deterministic time in stores and tests
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// ISO-8601 timestamp with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Long US-style date, e.g. `October 19, 2026`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Parse an RFC 3339 timestamp and format it with [`format_date`]
pub fn format_date_str(raw: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(raw)?;
    Ok(format_date(parsed.with_timezone(&Utc)))
}

/// Serde adapter writing timestamps with [`iso_timestamp`]
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::iso_timestamp(*at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) fn test_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_792_400_000, 0).expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let start = test_now();
        let mut clock = Clock::fixed(start);
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now() - start, Duration::seconds(90));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::System;
        clock.advance(Duration::days(365));
        assert!(clock.now() <= Utc::now());
    }

    #[test]
    fn iso_timestamp_uses_z_suffix() {
        let at = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn format_date_is_long_form() {
        let at = DateTime::parse_from_rfc3339("2026-03-05T12:00:00Z").unwrap();
        assert_eq!(format_date(at.with_timezone(&Utc)), "March 5, 2026");
    }

    #[test]
    fn format_date_str_rejects_garbage() {
        assert!(format_date_str("yesterday").is_err());
        assert_eq!(format_date_str("2026-10-19T08:30:00.000Z").unwrap(), "October 19, 2026");
    }
}
