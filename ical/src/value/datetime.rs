// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date and date-time values as defined in RFC 5545 Sections 3.3.4, 3.3.5
//! and 3.3.12.

use chumsky::prelude::*;

use crate::value::num::{Extra, fixed_digits};

/// Date value in the iCalendar basic format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,

    /// Month component, 1-12.
    pub month: i8,

    /// Day component, 1-31.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`.
    #[must_use]
    pub fn civil(self) -> jiff::civil::Date {
        self.into()
    }
}

impl From<jiff::civil::Date> for ValueDate {
    fn from(value: jiff::civil::Date) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
        }
    }
}

impl From<ValueDate> for jiff::civil::Date {
    fn from(value: ValueDate) -> Self {
        jiff::civil::date(value.year, value.month, value.day)
    }
}

/// Time value defined in RFC 5545 Section 3.3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: i8,
    /// Minute component, 0-59.
    pub minute: i8,
    /// Second component, 0-60 (60 for a leap second).
    pub second: i8,
    /// Whether the time is in UTC (indicated by a trailing 'Z').
    pub utc: bool,
}

impl ValueTime {
    /// Convert to `jiff::civil::Time`, folding a leap second onto :59.
    #[must_use]
    pub fn civil(self) -> jiff::civil::Time {
        jiff::civil::time(self.hour, self.minute, self.second.min(59), 0)
    }
}

/// Date-Time value defined in RFC 5545 Section 3.3.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,

    /// Time component.
    pub time: ValueTime,
}

impl ValueDateTime {
    /// Convert to `jiff::civil::DateTime`.
    #[must_use]
    pub fn civil(self) -> jiff::civil::DateTime {
        jiff::civil::DateTime::from_parts(self.date.civil(), self.time.civil())
    }
}

/// A date or date-time, as permitted for UNTIL and for RDATE/EXDATE entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    /// Date without a time component.
    Date(ValueDate),
    /// Date with a time component.
    DateTime(ValueDateTime),
}

impl DateOrDateTime {
    /// Whether this value carries no time component.
    #[must_use]
    pub fn is_date(self) -> bool {
        matches!(self, DateOrDateTime::Date(_))
    }

    /// The date component.
    #[must_use]
    pub fn date(self) -> ValueDate {
        match self {
            DateOrDateTime::Date(d) => d,
            DateOrDateTime::DateTime(dt) => dt.date,
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub fn value_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> {
    fixed_digits(4)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .try_map(|((year, month), day), span| {
            let (year, month, day) = (year as i16, month as i8, day as i8);
            if jiff::civil::Date::new(year, month, day).is_err() {
                return Err(Rich::custom(span, "invalid calendar date"));
            }
            Ok(ValueDate { year, month, day })
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// ;The "60" value is used to account for positive "leap" seconds.
///
/// time-utc     = "Z"
/// ```
fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> {
    fixed_digits(2)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .then(just('Z').or_not())
        .try_map(|(((hour, minute), second), utc), span| {
            if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) || !(0..=60).contains(&second)
            {
                return Err(Rich::custom(span, "invalid time of day"));
            }
            Ok(ValueTime {
                hour: hour as i8,
                minute: minute as i8,
                second: second as i8,
                utc: utc.is_some(),
            })
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date-time  = date "T" time ;As specified in the DATE and TIME
/// ```
pub fn value_date_time<'src>() -> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .map(|(date, time)| ValueDateTime { date, time })
}

/// A date-time when a time component is present, otherwise a bare date.
pub fn date_or_date_time<'src>() -> impl Parser<'src, &'src str, DateOrDateTime, Extra<'src>> {
    choice((
        value_date_time().map(DateOrDateTime::DateTime),
        value_date().map(DateOrDateTime::Date),
    ))
}
