// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt::{self, Display};

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;

/// A single value emitted by a recurrence stream: a date for all-day series,
/// a date-time for timed series. Emitted date-times are in UTC.
///
/// A date and a date-time over the same calendar day are distinct values:
/// they never compare equal, so an all-day exclusion cannot cancel a timed
/// occurrence (or the other way around). The ordering is still total, with
/// the date sorting just before any date-time of the same day, which is what
/// lets streams of both kinds merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// All-day value.
    Date(Date),
    /// Timed value, in UTC once emitted.
    DateTime(DateTime),
}

impl Occurrence {
    /// The date component.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Occurrence::Date(d) => *d,
            Occurrence::DateTime(dt) => dt.date(),
        }
    }

    /// The time component, if this is a timed value.
    #[must_use]
    pub fn time(&self) -> Option<Time> {
        match self {
            Occurrence::Date(_) => None,
            Occurrence::DateTime(dt) => Some(dt.time()),
        }
    }

    /// Whether this is an all-day value.
    #[must_use]
    pub fn is_date_only(&self) -> bool {
        matches!(self, Occurrence::Date(_))
    }

    /// Normalize a wall-clock value in `tz` to UTC. All-day values have no
    /// clock to convert and pass through unchanged.
    pub(crate) fn in_utc(self, tz: &TimeZone) -> Occurrence {
        match self {
            Occurrence::Date(_) => self,
            Occurrence::DateTime(dt) => Occurrence::DateTime(to_utc(dt, tz)),
        }
    }
}

impl PartialOrd for Occurrence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Occurrence {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.date(), self.time()).cmp(&(other.date(), other.time()))
    }
}

impl Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::Date(d) => {
                write!(f, "{:04}{:02}{:02}", d.year(), d.month(), d.day())
            }
            Occurrence::DateTime(dt) => write!(
                f,
                "{:04}{:02}{:02}T{:02}{:02}{:02}Z",
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
        }
    }
}

/// A pull-based stream of strictly increasing UTC occurrences.
pub trait RecurrenceIterator: Iterator<Item = Occurrence> {
    /// The next occurrence without consuming it.
    fn peek(&mut self) -> Option<Occurrence>;

    /// Skip forward so that the next occurrence is the first one at or after
    /// `instant` (given in UTC). Never moves the stream backwards.
    fn advance_to(&mut self, instant: Occurrence);
}

/// Convert a wall-clock civil instant in `tz` to the equivalent UTC civil
/// instant.
pub(crate) fn to_utc(dt: DateTime, tz: &TimeZone) -> DateTime {
    match dt.to_zoned(tz.clone()) {
        Ok(zoned) => zoned.with_time_zone(TimeZone::UTC).datetime(),
        Err(err) => {
            tracing::warn!(%err, %dt, "instant not representable in zone; keeping civil value");
            dt
        }
    }
}

/// Convert a UTC civil instant to the wall clock of `tz`.
pub(crate) fn from_utc(dt: DateTime, tz: &TimeZone) -> DateTime {
    match dt.to_zoned(TimeZone::UTC) {
        Ok(zoned) => zoned.with_time_zone(tz.clone()).datetime(),
        Err(err) => {
            tracing::warn!(%err, %dt, "instant not representable in zone; keeping civil value");
            dt
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};

    use super::*;

    #[test]
    fn orders_dates_and_date_times_together() {
        let day = Occurrence::Date(date(1997, 9, 2));
        let midnight = Occurrence::DateTime(datetime(1997, 9, 2, 0, 0, 0, 0));
        let morning = Occurrence::DateTime(datetime(1997, 9, 2, 9, 0, 0, 0));
        let next_day = Occurrence::Date(date(1997, 9, 3));

        assert!(day < midnight);
        assert!(midnight < morning);
        assert!(morning < next_day);
    }

    #[test]
    fn date_never_equals_date_time_of_same_day() {
        let day = Occurrence::Date(date(1997, 9, 2));
        let midnight = Occurrence::DateTime(datetime(1997, 9, 2, 0, 0, 0, 0));
        assert_ne!(day, midnight);
    }

    #[test]
    fn renders_ical_basic_format() {
        assert_eq!(Occurrence::Date(date(1997, 9, 2)).to_string(), "19970902");
        assert_eq!(
            Occurrence::DateTime(datetime(1997, 9, 2, 9, 0, 0, 0)).to_string(),
            "19970902T090000Z"
        );
    }

    #[test]
    fn converts_wall_clock_to_utc() {
        let tz = TimeZone::get("America/New_York").unwrap();
        // EDT, UTC-4
        let summer = to_utc(datetime(1997, 9, 2, 9, 0, 0, 0), &tz);
        assert_eq!(summer, datetime(1997, 9, 2, 13, 0, 0, 0));
        // EST, UTC-5
        let winter = to_utc(datetime(1997, 12, 2, 9, 0, 0, 0), &tz);
        assert_eq!(winter, datetime(1997, 12, 2, 14, 0, 0, 0));
    }

    #[test]
    fn round_trips_through_utc() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let wall = datetime(1997, 10, 26, 9, 0, 0, 0);
        assert_eq!(from_utc(to_utc(wall, &tz), &tz), wall);
    }
}
